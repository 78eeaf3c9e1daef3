use serde::{Deserialize, Serialize};

use crate::core::{id::ProfileId, time::Duration};

pub const DEFAULT_MAX_TEMP_C: f64 = 60.0;

/// Named temperature/duration program a room can be started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub total_hours: f64,
    #[serde(default)]
    pub max_temp_c: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Profile {
    pub fn max_temp_c(&self) -> f64 {
        self.max_temp_c.unwrap_or(DEFAULT_MAX_TEMP_C)
    }

    pub fn run_duration(&self) -> Duration {
        Duration::hours_f64(self.total_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::fixture;
    use crate::t;

    #[test]
    fn max_temp_defaults() {
        let mut profile = fixture::profile("p1", 48.0);
        assert_eq!(profile.max_temp_c(), DEFAULT_MAX_TEMP_C);

        profile.max_temp_c = Some(75.0);
        assert_eq!(profile.max_temp_c(), 75.0);
    }

    #[test]
    fn run_duration_rounds_fractional_hours() {
        assert_eq!(fixture::profile("p1", 12.25).run_duration(), t!(735 minutes));
    }
}
