use serde::{Deserialize, Serialize};

use crate::core::time::{Countdown, DateTime, Duration, Time};

pub const SHIFT_HOURS_LIMIT: i32 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StartMode {
    #[default]
    Now,
    Schedule,
}

/// Resolves when a run starts. A scheduled clock that already passed today (compared by
/// minute) means tomorrow; the current minute means now.
pub fn resolve_start_instant(now: &DateTime, mode: StartMode, schedule_clock: Time) -> DateTime {
    match mode {
        StartMode::Now => *now,
        StartMode::Schedule => now.next_occurrence_of(schedule_clock),
    }
}

pub fn add_hours(start: &DateTime, hours: f64) -> DateTime {
    *start + Duration::hours_f64(hours)
}

pub fn clamp_shift_hours(shift_hours: i32) -> i32 {
    shift_hours.clamp(-SHIFT_HOURS_LIMIT, SHIFT_HOURS_LIMIT)
}

/// Inputs of a START run as configured on the third wizard step.
#[derive(Debug, Clone, PartialEq)]
pub struct StartPlan {
    pub total_hours: f64,
    pub mode: StartMode,
    pub schedule_clock: Time,
    pub shift_hours: i32,
}

/// Start and end of a run. `shift_hours` travels alongside for the equipment layer and
/// never moves `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub mode: StartMode,
    pub start: DateTime,
    pub end: DateTime,
    pub shift_hours: i32,
}

/// Display data for the start confirmation. Built per read, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub start_clock: Time,
    pub end_clock: Time,
    pub starts_in: String,
    pub ends_in: String,
    pub shift_hours: i32,
}

impl Schedule {
    pub fn compute(now: &DateTime, plan: &StartPlan) -> Self {
        let start = resolve_start_instant(now, plan.mode, plan.schedule_clock);
        let end = add_hours(&start, plan.total_hours);

        Self {
            mode: plan.mode,
            start,
            end,
            shift_hours: clamp_shift_hours(plan.shift_hours),
        }
    }

    pub fn until_start(&self, now: &DateTime) -> Countdown {
        Countdown::between(now, &self.start)
    }

    pub fn until_end(&self, now: &DateTime) -> Countdown {
        Countdown::between(now, &self.end)
    }

    pub fn summary(&self, now: &DateTime) -> ScheduleSummary {
        ScheduleSummary {
            start_clock: self.start.time(),
            end_clock: self.end.time(),
            starts_in: self.until_start(now).starts_in(),
            ends_in: self.until_end(now).ends_in(),
            shift_hours: self.shift_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t;

    fn day_at(time: Time) -> DateTime {
        DateTime::from_iso("2025-06-10T12:00:00Z").unwrap().at(time).unwrap()
    }

    fn plan(total_hours: f64, mode: StartMode, schedule_clock: Time) -> StartPlan {
        StartPlan {
            total_hours,
            mode,
            schedule_clock,
            shift_hours: 0,
        }
    }

    #[test]
    fn now_mode_returns_now_exactly() {
        let now = day_at(t!(09:00)) + t!(42 seconds);

        assert_eq!(resolve_start_instant(&now, StartMode::Now, t!(03:00)), now);
    }

    #[test]
    fn schedule_never_resolves_to_the_past() {
        let now = day_at(t!(13:17)) + t!(5 seconds);

        for minutes in (0..1440).step_by(7) {
            let clock = Time::from_minutes(minutes);
            let start = resolve_start_instant(&now, StartMode::Schedule, clock);

            assert!(start >= now, "{} resolved before now", clock);
            assert!(start.elapsed_since(now) < t!(24 hours), "{} more than a day ahead", clock);
            assert_eq!(start.time(), clock);
        }
    }

    #[test]
    fn schedule_at_current_minute_is_now() {
        let now = day_at(t!(10:00)) + t!(30 seconds);

        assert_eq!(resolve_start_instant(&now, StartMode::Schedule, t!(10:00)), now);
    }

    #[test]
    fn earlier_clock_is_exactly_one_day_after_same_day_instant() {
        let now = day_at(t!(10:00));

        let start = resolve_start_instant(&now, StartMode::Schedule, t!(07:30));

        assert_eq!(start.elapsed_since(day_at(t!(07:30))), t!(24 hours));
    }

    #[test]
    fn end_minutes_follow_rounded_duration() {
        let now = day_at(t!(06:10));

        for hours in [0.5, 1.25, 2.0, 7.99, 12.0] {
            let schedule = Schedule::compute(&now, &plan(hours, StartMode::Now, t!(00:00)));
            let expected = ((hours * 60.0_f64).round() as i64).rem_euclid(1440);

            let diff = (schedule.end.time().to_minutes() - schedule.start.time().to_minutes()).rem_euclid(1440);
            assert_eq!(diff, expected, "{} hours", hours);
        }
    }

    #[test]
    fn shift_hours_are_clamped_and_do_not_move_end() {
        let now = day_at(t!(09:00));
        let mut shifted = plan(10.0, StartMode::Now, t!(00:00));
        shifted.shift_hours = 40;

        let schedule = Schedule::compute(&now, &shifted);

        assert_eq!(schedule.shift_hours, SHIFT_HOURS_LIMIT);
        assert_eq!(schedule.end, now + t!(10 hours));
        assert_eq!(clamp_shift_hours(-30), -SHIFT_HOURS_LIMIT);
        assert_eq!(clamp_shift_hours(3), 3);
    }

    #[test]
    fn summary_recomputes_against_given_now() {
        let opened = day_at(t!(10:00));
        let schedule = Schedule::compute(&opened, &plan(2.0, StartMode::Schedule, t!(11:00)));

        let first = schedule.summary(&opened);
        let later = schedule.summary(&(opened + t!(20 minutes)));

        assert_eq!(first.starts_in, "starts in 1 hour 0 minutes");
        assert_eq!(first.ends_in, "ends in 3 hours 0 minutes");
        assert_eq!(later.starts_in, "starts in 0 hours 40 minutes");
        assert_eq!(later.end_clock, t!(13:00));
    }
}
