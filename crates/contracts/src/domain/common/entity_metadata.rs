use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (отметки жизненного цикла)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl EntityMetadata {
    /// Метаданные новой записи: обе отметки совпадают
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_record_has_equal_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let meta = EntityMetadata::new_at(now);
        assert_eq!(meta.created_at, meta.updated_at);
    }

    #[test]
    fn serialized_with_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let json = serde_json::to_value(EntityMetadata::new_at(now)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
