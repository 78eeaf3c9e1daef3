mod confirmation;
mod eligibility;

pub use confirmation::{ConfirmationResolver, ConfirmationVariant, Icon, ProgressField, Tone, resolve};
pub use eligibility::{EligibilityRules, is_permitted};

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::room::OperatingState;

/// Operator command for a room. Exactly one is chosen per wizard pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Start,
    Stop,
    Reset,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Start, Action::Stop, Action::Reset];

    pub fn code(&self) -> &'static str {
        match self {
            Action::Start => "START",
            Action::Stop => "STOP",
            Action::Reset => "RESET",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Action::Start => "Start drying",
            Action::Stop => "Stop drying",
            Action::Reset => "Reset",
        }
    }

    fn tone(&self) -> TileTone {
        match self {
            Action::Start => TileTone::Green,
            Action::Stop => TileTone::Orange,
            Action::Reset => TileTone::Red,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileTone {
    Green,
    Orange,
    Red,
    Gray,
}

/// Selectable action on the second wizard step. Disabled tiles are always gray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTile {
    pub action: Action,
    pub title: &'static str,
    pub tone: TileTone,
    pub enabled: bool,
}

impl ActionTile {
    pub fn for_state(action: Action, state: OperatingState, rules: &EligibilityRules) -> Self {
        let enabled = rules.permits(action, state);

        Self {
            action,
            title: action.title(),
            tone: if enabled { action.tone() } else { TileTone::Gray },
            enabled,
        }
    }

    pub fn all_for_state(state: OperatingState, rules: &EligibilityRules) -> Vec<Self> {
        Action::ALL
            .into_iter()
            .map(|action| Self::for_state(action, state, rules))
            .collect()
    }
}
