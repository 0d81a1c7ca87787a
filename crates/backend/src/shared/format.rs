use chrono::{DateTime, Utc};

/// Second-precision UTC timestamp used by every success view,
/// e.g. `2025-12-30T05:03:17Z`
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Millisecond-precision UTC timestamp used by the admission error view,
/// e.g. `2025-12-30T05:03:17.863Z`
pub fn format_timestamp_millis(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Formats a count with dot-separated thousands, e.g. `1.234.567`
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
