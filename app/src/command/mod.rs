#![allow(async_fn_in_trait)]

use std::fmt::Display;

use serde::Serialize;

use crate::{
    core::{
        id::{ProfileId, RoomId},
        time::DateTime,
    },
    operation::Action,
    schedule::Schedule,
};

/// The only output of a wizard pass, handed to the equipment layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandIntent {
    pub room_id: RoomId,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_hours: Option<i32>,
}

impl CommandIntent {
    pub fn start(room_id: RoomId, profile_id: ProfileId, schedule: &Schedule) -> Self {
        Self {
            room_id,
            action: Action::Start,
            profile_id: Some(profile_id),
            start_at: Some(schedule.start),
            shift_hours: Some(schedule.shift_hours),
        }
    }

    pub fn operation(room_id: RoomId, action: Action) -> Self {
        Self {
            room_id,
            action,
            profile_id: None,
            start_at: None,
            shift_hours: None,
        }
    }
}

impl Display for CommandIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.action, self.room_id)?;

        if let Some(profile_id) = &self.profile_id {
            write!(f, " profile={}", profile_id)?;
        }
        if let Some(start_at) = &self.start_at {
            write!(f, " start={}", start_at)?;
        }

        Ok(())
    }
}

/// Boundary to the equipment layer. One call per confirmed intent; retries are the
/// operator's decision, never the caller's.
pub trait CommandSubmitter {
    async fn submit(&self, intent: &CommandIntent) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(CommandIntent),
    Rejected { intent: CommandIntent, reason: String },
}
