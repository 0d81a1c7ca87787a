use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::FarmerDetailError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 1000;

/// Largest row offset a store can address; SQL offsets are signed 64-bit.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Page position of a list request. Fields stay private so every instance
/// is normalized: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Zero page or limit falls back to the default; limit is capped.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 {
                DEFAULT_LIMIT
            } else {
                limit.min(MAX_LIMIT)
            },
        }
    }

    /// Builds a page request from raw query values. Absent, non-numeric,
    /// zero and negative values fall back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(DEFAULT_PAGE),
            parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows to skip, clamped to what a store can address. Pages that far
    /// out are empty anyway.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_OFFSET)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
}

/// Selection of records for a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmerFilter {
    pub coop_id: String,
    /// Inclusive lower bound on `updated_at`
    pub updated_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `updated_at`
    pub updated_to: Option<DateTime<Utc>>,
}

impl FarmerFilter {
    pub fn for_cooperative(coop_id: impl Into<String>) -> Self {
        Self {
            coop_id: coop_id.into(),
            updated_from: None,
            updated_to: None,
        }
    }

    /// Parses the `updatedFrom` / `updatedTo` query values. Empty strings count as absent.
    pub fn from_query(
        coop_id: impl Into<String>,
        updated_from: Option<&str>,
        updated_to: Option<&str>,
    ) -> Result<Self, FarmerDetailError> {
        let mut filter = Self::for_cooperative(coop_id);
        filter.updated_from = parse_bound(updated_from, Bound::Start, "updatedFrom")?;
        filter.updated_to = parse_bound(updated_to, Bound::End, "updatedTo")?;
        Ok(filter)
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

fn parse_bound(
    raw: Option<&str>,
    bound: Bound,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, FarmerDetailError> {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        // A bare date covers the whole day on either side of the window
        let time = match bound {
            Bound::Start => NaiveTime::default(),
            Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap_or_default(),
        };
        return Ok(Some(date.and_time(time).and_utc()));
    }

    Err(FarmerDetailError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}
