//! Date parsing for the date-family rules
//!
//! Field values are parsed from a small set of fixed formats. Comparison
//! parameters additionally accept the case-insensitive keywords `today`,
//! `yesterday` and `tomorrow`, which resolve to the start of that local day.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Formats tried, in order, for date-time strings
pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Format for plain calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Relative day keywords accepted as comparison parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKeyword {
    Today,
    Yesterday,
    Tomorrow,
}

impl DateKeyword {
    /// Recognize a keyword, ignoring case
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "tomorrow" => Some(Self::Tomorrow),
            _ => None,
        }
    }

    /// The start of the local day this keyword designates
    pub fn resolve(&self) -> NaiveDateTime {
        let today = Local::now().date_naive();
        let day = match self {
            Self::Today => today,
            Self::Yesterday => today - Duration::days(1),
            Self::Tomorrow => today + Duration::days(1),
        };
        day.and_time(NaiveTime::MIN)
    }
}

/// Whether a token is one of the relative day keywords
pub fn is_keyword(token: &str) -> bool {
    DateKeyword::parse(token).is_some()
}

/// Parse a literal date or date-time. Keywords are rejected.
pub fn parse_literal(token: &str) -> Option<NaiveDateTime> {
    let token = token.trim();

    if let Ok(date) = NaiveDate::parse_from_str(token, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(token, format) {
            return Some(datetime);
        }
    }

    DateTime::parse_from_rfc3339(token)
        .ok()
        .map(|datetime| datetime.with_timezone(&Local).naive_local())
}

/// Parse a comparison parameter: a literal or a keyword
pub fn parse_param(token: &str) -> Option<NaiveDateTime> {
    DateKeyword::parse(token)
        .map(|keyword| keyword.resolve())
        .or_else(|| parse_literal(token))
}

/// Parse a field value. Only strings holding a literal date qualify.
pub fn parse_value(value: &Value) -> Option<NaiveDateTime> {
    value.as_str().and_then(parse_literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_literal_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();

        assert_eq!(parse_literal("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_literal("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(
            parse_literal("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15).map(|d| d.and_time(NaiveTime::MIN))
        );
        assert!(parse_literal("2024-01-15T10:30:00Z").is_some());
        assert!(parse_literal("15/01/2024").is_none());
        assert!(parse_literal("2024-02-30").is_none());
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(DateKeyword::parse("Today"), Some(DateKeyword::Today));
        assert_eq!(DateKeyword::parse("YESTERDAY"), Some(DateKeyword::Yesterday));
        assert!(is_keyword("tomorrow"));
        assert!(!is_keyword("next_week"));
    }

    #[test]
    fn test_keyword_ordering() {
        let yesterday = parse_param("yesterday").unwrap();
        let today = parse_param("today").unwrap();
        let tomorrow = parse_param("tomorrow").unwrap();
        assert!(yesterday < today && today < tomorrow);
        assert_eq!(today, Local::now().date_naive().and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_value_rejects_keywords_and_non_strings() {
        assert!(parse_value(&json!("today")).is_none());
        assert!(parse_value(&json!(20240115)).is_none());
        assert!(parse_value(&json!("2024-01-15")).is_some());
    }
}
