pub mod builder;
mod countdown;
mod datetime;
mod duration;
mod time;

pub use countdown::{Countdown, describe_relative};
pub use datetime::DateTime;
pub use duration::Duration;
pub use time::{MINUTES_PER_DAY, Time};

#[cfg(test)]
pub use datetime::FIXED_NOW;
