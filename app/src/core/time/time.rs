use std::fmt::Display;

use anyhow::Context;
use chrono::Timelike;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Wall-clock time of day with minute precision, as entered on the schedule picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub(super) delegate: chrono::NaiveTime,
}

impl Time {
    pub(super) fn new(delegate: chrono::NaiveTime) -> Self {
        Self { delegate }
    }

    pub fn at(hour: u32, minute: u32) -> anyhow::Result<Self> {
        Ok(Self {
            delegate: chrono::NaiveTime::from_hms_opt(hour, minute, 0)
                .context(format!("Error parsing time {}:{}", hour, minute))?,
        })
    }

    /// Parses an "HH:MM" clock value. Components outside their range are clamped and
    /// unreadable components count as zero, so this never fails.
    pub fn parse_clock(value: &str) -> Self {
        let (hour, minute) = value.split_once(':').unwrap_or((value, ""));

        let hour = parse_component(hour).clamp(0, 23);
        let minute = parse_component(minute).clamp(0, 59);

        Self::from_minutes(hour * 60 + minute)
    }

    /// Minute of day, wrapped into `[0, 1439]`.
    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY);

        //always in range after wrapping
        let delegate = chrono::NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
            .unwrap_or(chrono::NaiveTime::MIN);

        Self::new(delegate)
    }

    pub fn to_minutes(&self) -> i64 {
        (self.hour() * 60 + self.minute()) as i64
    }

    pub fn hour(&self) -> u32 {
        self.delegate.hour()
    }

    pub fn minute(&self) -> u32 {
        self.delegate.minute()
    }

    /// Rounds the minute down to the picker's step (1, 5, 10, 15, ...).
    pub fn snapped_to(&self, minute_step: u32) -> Self {
        let step = minute_step.clamp(1, 60);
        let minute = self.minute() - self.minute() % step;

        Self::from_minutes((self.hour() * 60 + minute) as i64)
    }
}

fn parse_component(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate.format("%H:%M"))
    }
}
