//! Canonical price observation models

use chrono::{DateTime, Utc};

/// A single normalized gold spot quote.
///
/// `mid` is always present; the other quote fields are `None` when the feed
/// omitted them or sent something that is not a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// ISO-8601 timestamp exactly as published by the feed
    pub date: String,
    /// `date` parsed as an instant, `None` when it does not parse
    pub instant: Option<DateTime<Utc>>,
    pub ask: Option<f64>,
    pub mid: f64,
    pub bid: Option<f64>,
    /// Percentage change reported by the feed
    pub performance: Option<f64>,
}

impl PricePoint {
    /// Build a point with only a date and a mid price
    pub fn new(date: &str, mid: f64) -> Self {
        Self {
            date: date.to_string(),
            instant: parse_instant(date),
            ask: None,
            mid,
            bid: None,
            performance: None,
        }
    }
}

/// Parse an RFC 3339 timestamp (e.g. `2025-06-02T14:05:00+00:00`) into UTC
pub fn parse_instant(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sign class of a performance figure, used to colour the history table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceClass {
    Positive,
    Negative,
    Neutral,
}

impl PerformanceClass {
    /// > 0 is positive, < 0 is negative, anything else (0, absent) is neutral
    pub fn classify(performance: Option<f64>) -> Self {
        match performance {
            Some(p) if p > 0.0 => PerformanceClass::Positive,
            Some(p) if p < 0.0 => PerformanceClass::Negative,
            _ => PerformanceClass::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceClass::Positive => "positive",
            PerformanceClass::Negative => "negative",
            PerformanceClass::Neutral => "neutral",
        }
    }

    /// Display colour as `0xRRGGBB`
    pub fn color(&self) -> u32 {
        match self {
            PerformanceClass::Positive => 0x4caf50,
            PerformanceClass::Negative => 0xf44336,
            PerformanceClass::Neutral => 0xf5f5f5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_with_offset() {
        let instant = parse_instant("2025-06-02T16:05:00+02:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2025, 6, 2, 14, 5, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("").is_none());
    }

    #[test]
    fn test_performance_classification() {
        assert_eq!(PerformanceClass::classify(Some(5.0)), PerformanceClass::Positive);
        assert_eq!(PerformanceClass::classify(Some(-3.0)), PerformanceClass::Negative);
        assert_eq!(PerformanceClass::classify(Some(0.0)), PerformanceClass::Neutral);
        assert_eq!(PerformanceClass::classify(None), PerformanceClass::Neutral);
        assert_eq!(PerformanceClass::classify(Some(-0.0)), PerformanceClass::Neutral);
    }

    #[test]
    fn test_performance_class_names() {
        assert_eq!(PerformanceClass::Positive.as_str(), "positive");
        assert_eq!(PerformanceClass::Negative.as_str(), "negative");
        assert_eq!(PerformanceClass::Neutral.as_str(), "neutral");
    }
}
