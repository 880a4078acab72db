//! # Temporal Types: UTC Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds, used to
//! stamp validation reports. Rendered as `YYYY-MM-DDTHH:MM:SSZ` in
//! structured output and `YYYY-MM-DD HH:MM:SS` in human-readable output.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From Unix epoch seconds. `None` if out of chrono's range.
    pub fn from_epoch_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS`, for report headers.
    pub fn to_display_string(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.0.nanosecond(), 0);
    }

    #[test]
    fn truncation_drops_subseconds() {
        let dt = DateTime::from_timestamp(1_772_600_767, 999_000_000).unwrap();
        assert_eq!(
            Timestamp(truncate_to_seconds(dt)).to_iso8601(),
            "2026-03-04T05:06:07Z"
        );
    }

    #[test]
    fn out_of_range_epoch_is_none() {
        assert!(Timestamp::from_epoch_secs(i64::MAX).is_none());
    }

    #[test]
    fn display_forms() {
        let ts = Timestamp::from_epoch_secs(0).unwrap();
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00Z");
        assert_eq!(ts.to_display_string(), "1970-01-01 00:00:00");
    }
}
