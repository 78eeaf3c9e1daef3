use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use chrono::{LocalResult, NaiveTime, TimeZone, Timelike};
use tokio::task_local;

use super::{Duration, Time};

task_local! {
    pub static FIXED_NOW: DateTime;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DateTime {
    delegate: chrono::DateTime<chrono::Local>,
}

impl DateTime {
    fn new<T: chrono::TimeZone>(delegate: chrono::DateTime<T>) -> Self {
        Self {
            delegate: delegate.with_timezone(&chrono::Local),
        }
    }

    pub fn now() -> Self {
        FIXED_NOW
            .try_with(|t| *t)
            .unwrap_or_else(|_| chrono::Local::now().into())
    }

    pub fn from_iso(iso8601: &str) -> anyhow::Result<Self> {
        Ok(chrono::DateTime::parse_from_rfc3339(iso8601)?.into())
    }

    pub fn to_human_readable(&self) -> String {
        chrono_humanize::HumanTime::from(self.delegate).to_string()
    }

    pub fn time(&self) -> Time {
        Time::new(self.truncated_to_minute().delegate.time())
    }

    pub fn date(&self) -> chrono::NaiveDate {
        self.delegate.date_naive()
    }

    pub fn at(&self, time: Time) -> anyhow::Result<Self> {
        let dt = self
            .delegate
            .with_time(time.delegate)
            .earliest()
            .ok_or_else(|| anyhow::anyhow!("Error parsing time {:?} for date-time {:?}", time, self))?;

        Ok(dt.into())
    }

    pub fn truncated_to_minute(&self) -> Self {
        let seconds = chrono::Duration::seconds(self.delegate.second() as i64);
        let nanos = chrono::Duration::nanoseconds(self.delegate.nanosecond() as i64);

        Self::new(self.delegate - seconds - nanos)
    }

    /// First instant at or after `self` whose wall clock reads `time`, compared by minute.
    /// A clock earlier than the current minute lands on the next calendar day; the current
    /// minute returns `self` unchanged.
    pub fn next_occurrence_of(&self, time: Time) -> Self {
        next_wall_clock(&self.delegate, time.delegate).into()
    }

    pub fn elapsed_since(&self, since: Self) -> Duration {
        Duration::new(self.delegate - since.delegate)
    }
}

fn next_wall_clock<Tz: TimeZone>(now: &chrono::DateTime<Tz>, time: NaiveTime) -> chrono::DateTime<Tz> {
    let current = now.naive_local();
    let current_minute = current.hour() * 60 + current.minute();
    let target_minute = time.hour() * 60 + time.minute();

    if target_minute == current_minute {
        return now.clone();
    }

    let date = if target_minute < current_minute {
        current.date().succ_opt()
    } else {
        Some(current.date())
    };

    //end of the representable calendar
    let Some(date) = date else {
        return now.clone();
    };

    let target = date.and_time(time);

    match now.timezone().from_local_datetime(&target) {
        LocalResult::Single(start) => start,
        LocalResult::Ambiguous(earlier, later) => {
            if earlier >= *now {
                earlier
            } else {
                later
            }
        }
        //clock skipped by a forward shift: keep the wall-clock distance as elapsed time
        LocalResult::None => {
            let current_truncated = current
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(current);
            let now_truncated = now.clone() - (current - current_truncated);

            now_truncated + (target - current_truncated)
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate.format("%Y-%m-%d %H:%M"))
    }
}

impl Add<Duration> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        Self::new(self.delegate + rhs.delegate)
    }
}

impl Sub<Duration> for DateTime {
    type Output = DateTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self::new(self.delegate - rhs.delegate)
    }
}

impl<T: chrono::TimeZone> From<chrono::DateTime<T>> for DateTime {
    fn from(val: chrono::DateTime<T>) -> Self {
        DateTime::new(val)
    }
}
