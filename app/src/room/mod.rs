mod profile;
mod query;
mod snapshot;
mod state;

pub use profile::{DEFAULT_MAX_TEMP_C, Profile};
pub use query::RoomQuery;
pub use snapshot::ControlSnapshot;
pub use state::{OperatingState, UnknownOperatingState};

use serde::{Deserialize, Serialize};

use crate::core::{
    id::{FactoryId, RoomId},
    time::DateTime,
};

/// Snapshot of a room as delivered by the telemetry collaborator. Treated as immutable
/// for the lifetime of a wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    pub room_no: String,
    pub room_name: String,
    pub factory_id: FactoryId,
    pub factory_name: String,
    pub state: OperatingState,
    #[serde(default)]
    pub telemetry: Option<Telemetry>,
    #[serde(default)]
    pub progress: Option<Progress>,
    #[serde(default)]
    pub last_update_text: Option<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub temp_c: Option<f64>,
    #[serde(rename = "humRH")]
    pub hum_rh: Option<f64>,
    #[serde(alias = "furnanceOn")]
    pub furnace_on: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub hour_now: f64,
    pub hour_total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factory {
    pub factory_id: FactoryId,
    pub factory_name: String,
}

impl Room {
    pub fn hour_now(&self) -> Option<f64> {
        self.progress.map(|p| p.hour_now)
    }

    pub fn hour_total(&self) -> Option<f64> {
        self.progress.map(|p| p.hour_total)
    }

    /// Explicit text from the feed wins over the raw timestamp.
    pub fn last_update_display(&self) -> String {
        match (&self.last_update_text, &self.last_updated) {
            (Some(text), _) => text.clone(),
            (None, Some(ts)) => ts.to_human_readable(),
            (None, None) => "-".to_string(),
        }
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (room {}, {})", self.room_name, self.room_no, self.factory_name)
    }
}
