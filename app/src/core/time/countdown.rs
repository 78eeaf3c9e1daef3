use std::fmt::Display;

use super::DateTime;

/// Non-negative whole-minute distance from now to a target instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown {
    total_minutes: i64,
}

impl Countdown {
    /// Both ends are compared at minute resolution, matching the clock the operator sees.
    /// Targets in the past collapse to zero.
    pub fn between(now: &DateTime, target: &DateTime) -> Self {
        let minutes = target
            .truncated_to_minute()
            .elapsed_since(now.truncated_to_minute())
            .as_minutes();

        Self {
            total_minutes: minutes.max(0),
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    pub fn hours(&self) -> i64 {
        self.total_minutes / 60
    }

    pub fn minutes(&self) -> i64 {
        self.total_minutes % 60
    }

    pub fn is_due(&self) -> bool {
        self.total_minutes == 0
    }

    pub fn starts_in(&self) -> String {
        if self.is_due() {
            "starts now".to_string()
        } else {
            format!("starts in {}", self)
        }
    }

    pub fn ends_in(&self) -> String {
        if self.is_due() {
            "ends now".to_string()
        } else {
            format!("ends in {}", self)
        }
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.hours(),
            plural(self.hours(), "hour"),
            self.minutes(),
            plural(self.minutes(), "minute")
        )
    }
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

pub fn describe_relative(now: &DateTime, target: &DateTime) -> String {
    Countdown::between(now, target).starts_in()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::Time;
    use crate::t;

    fn day_at(time: Time) -> DateTime {
        DateTime::from_iso("2025-06-10T12:00:00Z").unwrap().at(time).unwrap()
    }

    #[test]
    fn same_instant_starts_now() {
        let now = day_at(t!(10:00)) + t!(12 seconds);

        assert_eq!(describe_relative(&now, &now), "starts now");
    }

    #[test]
    fn describes_hours_and_minutes() {
        let now = day_at(t!(10:00));
        let target = now + t!(21 hours) + t!(30 minutes);

        assert_eq!(describe_relative(&now, &target), "starts in 21 hours 30 minutes");
    }

    #[test]
    fn keeps_zero_components() {
        let now = day_at(t!(09:00));
        let target = now + t!(48 hours);

        let countdown = Countdown::between(&now, &target);

        assert_eq!(countdown.ends_in(), "ends in 48 hours 0 minutes");
    }

    #[test]
    fn singular_units() {
        let now = day_at(t!(09:00));
        let target = now + t!(61 minutes);

        assert_eq!(describe_relative(&now, &target), "starts in 1 hour 1 minute");
    }

    #[test]
    fn past_target_never_negative() {
        let now = day_at(t!(09:00));
        let target = day_at(t!(08:00));

        let countdown = Countdown::between(&now, &target);

        assert!(countdown.is_due());
        assert_eq!(countdown.starts_in(), "starts now");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let now = day_at(t!(10:00));
        let target = day_at(t!(13:45));

        assert_eq!(describe_relative(&now, &target), describe_relative(&now, &target));
    }
}
