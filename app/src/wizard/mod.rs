mod controller;
mod refresh;

pub use controller::WizardController;
pub use refresh::{RefreshTimer, Repaint};

use derive_more::derive::Display;

use crate::{
    command::CommandIntent,
    core::{
        id::{ProfileId, RoomId},
        time::Time,
    },
    operation::{Action, ConfirmationVariant},
    room::Profile,
    schedule::{Schedule, ScheduleSummary, StartMode},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum WizardStep {
    #[default]
    #[display("1 (select room)")]
    SelectRoom,
    #[display("2 (select action)")]
    SelectAction,
    #[display("3 (configure start)")]
    ConfigureStart,
    #[display("confirmation")]
    Confirm,
}

/// Reason the current step cannot be left yet. Shown next to the step, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Blocker {
    #[display("Select a room")]
    NoRoomSelected,
    #[display("Select an action")]
    NoActionSelected,
    #[display("{action} is not available in the room's current state")]
    ActionNotPermitted { action: Action },
    #[display("Select a drying profile")]
    NoProfileSelected,
    #[display("Pick a start time")]
    NoScheduleClock,
    #[display("Acknowledge that the equipment is safe")]
    NotAcknowledged,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartForm {
    pub profile_id: Option<ProfileId>,
    pub start_mode: StartMode,
    pub schedule_clock: Option<Time>,
    pub shift_hours: i32,
}

/// Handle for one submission attempt. Only the ticket handed out by the latest
/// `begin_submission` can complete it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTicket {
    id: u64,
    intent: CommandIntent,
}

impl SubmissionTicket {
    pub(crate) fn new(id: u64, intent: CommandIntent) -> Self {
        Self { id, intent }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn intent(&self) -> &CommandIntent {
        &self.intent
    }

    pub fn into_intent(self) -> CommandIntent {
        self.intent
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Submission {
    #[default]
    Idle,
    InFlight(SubmissionTicket),
    Failed(String),
}

/// Mutable state of one pass through the wizard. Dropped back to default on success or
/// abandonment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardSession {
    pub step: WizardStep,
    pub selected_room_id: Option<RoomId>,
    pub selected_action: Option<Action>,
    pub start_form: StartForm,
    pub acknowledged: bool,
    pub submission: Submission,
}

impl WizardSession {
    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, Submission::InFlight(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.submission {
            Submission::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartConfirmation {
    pub room_id: RoomId,
    pub room_name: String,
    pub profile: Profile,
    pub schedule: Schedule,
    pub summary: ScheduleSummary,
}

/// What the confirmation gate presents, recomputed on every read.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Start(StartConfirmation),
    Operation {
        action: Action,
        room_id: RoomId,
        variant: ConfirmationVariant,
        body: String,
    },
}

impl Confirmation {
    pub fn requires_acknowledgement(&self) -> bool {
        match self {
            Confirmation::Start(_) => false,
            Confirmation::Operation { variant, .. } => variant.requires_acknowledgement,
        }
    }
}
