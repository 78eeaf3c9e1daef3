use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use super::{Factory, Profile, Room};

/// Read-only inputs for a wizard session, in the shape of the console's control feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSnapshot {
    #[serde(default)]
    pub factories: Vec<Factory>,
    pub rooms: Vec<Room>,
    pub profiles: Vec<Profile>,
}

impl ControlSnapshot {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Error parsing control snapshot")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading control snapshot {}", path.display()))?;

        let snapshot = Self::from_json(&json)?;

        tracing::debug!(
            rooms = snapshot.rooms.len(),
            profiles = snapshot.profiles.len(),
            "Loaded control snapshot from {}",
            path.display()
        );

        Ok(snapshot)
    }
}
