use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    pub(super) delegate: chrono::Duration,
}

impl Duration {
    pub(super) fn new(delegate: chrono::Duration) -> Self {
        Self { delegate }
    }

    pub fn zero() -> Self {
        Self::new(chrono::Duration::zero())
    }

    pub fn hours(hours: i64) -> Self {
        Self::new(chrono::Duration::hours(hours))
    }

    /// Fractional hours rounded to the nearest minute. Negative and non-finite input
    /// yields zero.
    pub fn hours_f64(hours: f64) -> Self {
        let minutes = (hours * 60.0).round();

        if minutes.is_finite() && minutes > 0.0 {
            Self::minutes(minutes as i64)
        } else {
            Self::zero()
        }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self::new(chrono::Duration::minutes(minutes))
    }

    pub fn seconds(seconds: i64) -> Self {
        Self::new(chrono::Duration::seconds(seconds))
    }

    pub fn as_secs(&self) -> i64 {
        self.delegate.num_seconds()
    }

    pub fn as_minutes(&self) -> i64 {
        self.delegate.num_minutes()
    }

    pub fn as_hours(&self) -> i64 {
        self.delegate.num_hours()
    }
}

impl std::ops::Add<Duration> for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            delegate: self.delegate + rhs.delegate,
        }
    }
}

impl From<Duration> for std::time::Duration {
    fn from(val: Duration) -> Self {
        let millis = val.delegate.num_milliseconds().max(0);
        std::time::Duration::from_millis(millis as u64)
    }
}

/// Parses ISO-8601 durations such as `PT20S`. Years and months have no fixed length and
/// are rejected.
impl FromStr for Duration {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let iso = iso8601_duration::Duration::parse(value.trim())
            .map_err(|e| anyhow::anyhow!("Error parsing {} to duration: {:?}", value, e))?;

        iso.to_chrono()
            .map(Self::new)
            .ok_or_else(|| anyhow::anyhow!("Duration {} must not contain years or months", value))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    #[test]
    fn fractional_hours_round_to_minute() {
        assert_eq!(Duration::hours_f64(1.5), t!(90 minutes));
        assert_eq!(Duration::hours_f64(0.0083), t!(0 minutes));
        assert_eq!(Duration::hours_f64(0.0084), t!(1 minutes));
        assert_eq!(Duration::hours_f64(48.0), t!(48 hours));
    }

    #[test]
    fn non_positive_hours_are_zero() {
        assert_eq!(Duration::hours_f64(-2.0), Duration::zero());
        assert_eq!(Duration::hours_f64(f64::NAN), Duration::zero());
    }

    #[test]
    fn deserialize_refresh_interval() {
        let duration = serde_json::from_str::<Duration>(r#""PT20S""#).unwrap();
        assert_eq!(duration, t!(20 seconds));
    }

    #[test]
    fn parses_combined_units() {
        assert_eq!("PT8H15M".parse::<Duration>().unwrap(), t!(8 hours) + t!(15 minutes));
        assert_eq!("P1DT2H".parse::<Duration>().unwrap(), t!(26 hours));
    }

    #[test]
    fn calendar_units_are_rejected() {
        assert!("P1Y".parse::<Duration>().is_err());
        assert!("P2M".parse::<Duration>().is_err());
    }

    #[test]
    fn malformed_duration_is_rejected() {
        assert!("20 seconds".parse::<Duration>().is_err());
        assert!(serde_json::from_str::<Duration>(r#""soon""#).is_err());
        assert!(serde_json::from_str::<Duration>("20").is_err());
    }

    #[test]
    fn converts_to_std() {
        let std: std::time::Duration = t!(20 seconds).into();
        assert_eq!(std, std::time::Duration::from_secs(20));
    }
}
