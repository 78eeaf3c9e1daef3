
use std::sync::Mutex;

use crate::{
    command::{CommandIntent, CommandSubmitter},
    core::time::{DateTime, Time},
    room::ControlSnapshot,
    settings::ControlSettings,
    wizard::WizardController,
};

const SNAPSHOT: &str = include_str!("../../../data/control.json");

pub fn wizard() -> WizardController {
    let snapshot = ControlSnapshot::from_json(SNAPSHOT).unwrap();
    WizardController::from_snapshot(snapshot, ControlSettings::default())
}

/// Local wall-clock instant on a fixed test day.
pub fn day_at(time: Time) -> DateTime {
    DateTime::from_iso("2025-06-10T12:00:00Z").unwrap().at(time).unwrap()
}

pub struct RecordingSubmitter {
    failure: Option<String>,
    submitted: Mutex<Vec<CommandIntent>>,
}

impl RecordingSubmitter {
    pub fn accepting() -> Self {
        Self {
            failure: None,
            submitted: Mutex::new(vec![]),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            submitted: Mutex::new(vec![]),
        }
    }

    pub fn submitted(&self) -> Vec<CommandIntent> {
        self.submitted.lock().unwrap().clone()
    }
}

impl CommandSubmitter for RecordingSubmitter {
    async fn submit(&self, intent: &CommandIntent) -> anyhow::Result<()> {
        self.submitted.lock().unwrap().push(intent.clone());

        match &self.failure {
            Some(reason) => Err(anyhow::anyhow!("{}", reason).context("Equipment gateway rejected command")),
            None => Ok(()),
        }
    }
}
