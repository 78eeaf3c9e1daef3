use std::path::PathBuf;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use infrastructure::MonitoringConfig;
use serde::Deserialize;

use crate::{core::time::Duration, operation::EligibilityRules};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub control: ControlSettings,
    pub snapshot: SnapshotSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Config::builder().add_source(File::with_name("config.toml")))
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let s = builder
            .add_source(Environment::default().separator("_").list_separator(","))
            .build()?;

        s.try_deserialize()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlSettings {
    pub eligibility: EligibilityRules,
    pub now_refresh_interval: Duration,
    pub schedule_minute_step: u32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            eligibility: EligibilityRules::default(),
            now_refresh_interval: Duration::seconds(20),
            schedule_minute_step: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotSettings {
    pub path: PathBuf,
}
