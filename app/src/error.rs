use derive_more::derive::{Display, Error};

use crate::{
    core::id::{ProfileId, RoomId},
    operation::Action,
    room::OperatingState,
    wizard::{Blocker, WizardStep},
};

/// Precondition violations. These indicate the calling shell let an illegal interaction
/// through (a disabled tile was clicked, a gated button was pressed), so they are rejected
/// instead of being resolved to some default.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ControlError {
    #[display("{action} is not permitted while the room is {state}")]
    NotPermitted { action: Action, state: OperatingState },

    #[display("{operation} is not available on step {step}")]
    WrongStep { operation: &'static str, step: WizardStep },

    #[display("Cannot leave step {step}: {blocker}")]
    GateNotSatisfied { step: WizardStep, blocker: Blocker },

    #[display("Unknown room {room_id}")]
    UnknownRoom { room_id: RoomId },

    #[display("Unknown profile {profile_id}")]
    UnknownProfile { profile_id: ProfileId },

    #[display("A command submission is already in flight")]
    SubmissionInFlight,

    #[display("Room {room_id} is hidden by the current filter")]
    RoomNotListed { room_id: RoomId },

    #[display("Submission {ticket} is not the one in flight")]
    StaleSubmission { ticket: u64 },
}
