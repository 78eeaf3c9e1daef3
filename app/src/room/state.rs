use std::{fmt::Display, str::FromStr};

use derive_more::derive::{Display as DeriveDisplay, Error};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a drying room as reported by the equipment layer. Read-only for
/// this crate: nothing here ever assigns a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingState {
    Ready,
    Running,
    WarmHold,
    Waiting,
    Stopped,
    Fault,
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveDisplay, Error)]
#[display("Unknown operating state '{value}'")]
pub struct UnknownOperatingState {
    value: String,
}

impl OperatingState {
    pub const ALL: [OperatingState; 6] = [
        OperatingState::Ready,
        OperatingState::Running,
        OperatingState::WarmHold,
        OperatingState::Waiting,
        OperatingState::Stopped,
        OperatingState::Fault,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            OperatingState::Ready => "READY",
            OperatingState::Running => "RUNNING",
            OperatingState::WarmHold => "WARM_HOLD",
            OperatingState::Waiting => "WAITING",
            OperatingState::Stopped => "STOPPED",
            OperatingState::Fault => "FAULT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperatingState::Ready => "Ready",
            OperatingState::Running => "Running",
            OperatingState::WarmHold => "Warm hold",
            OperatingState::Waiting => "Waiting",
            OperatingState::Stopped => "Stopped",
            OperatingState::Fault => "Fault",
        }
    }
}

impl Display for OperatingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OperatingState {
    type Err = UnknownOperatingState;

    //telemetry feeds are not consistent about case and separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join("_").to_uppercase();

        OperatingState::ALL
            .into_iter()
            .find(|state| state.code() == normalized)
            .ok_or_else(|| UnknownOperatingState { value: s.to_string() })
    }
}
