use serde::{Deserialize, Serialize};

use super::Action;
use crate::room::OperatingState;

/// Built-in gate for operator intent. Exhaustive over every action/state pair; equipment
/// state transitions themselves happen elsewhere.
pub fn is_permitted(action: Action, state: OperatingState) -> bool {
    use OperatingState::*;

    match action {
        Action::Start => matches!(state, Ready | Stopped),
        Action::Stop => matches!(state, Running | WarmHold | Waiting),
        Action::Reset => matches!(state, Fault | Stopped),
    }
}

/// Eligibility table as configuration. Defaults to [`is_permitted`]; sites may widen or
/// narrow it (e.g. allowing START from WAITING) without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    pub start: Vec<OperatingState>,
    pub stop: Vec<OperatingState>,
    pub reset: Vec<OperatingState>,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        let states_for = |action: Action| -> Vec<OperatingState> {
            OperatingState::ALL
                .into_iter()
                .filter(|state| is_permitted(action, *state))
                .collect()
        };

        Self {
            start: states_for(Action::Start),
            stop: states_for(Action::Stop),
            reset: states_for(Action::Reset),
        }
    }
}

impl EligibilityRules {
    pub fn permits(&self, action: Action, state: OperatingState) -> bool {
        let states = match action {
            Action::Start => &self.start,
            Action::Stop => &self.stop,
            Action::Reset => &self.reset,
        };

        states.contains(&state)
    }

    pub fn permitted_actions(&self, state: OperatingState) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| self.permits(*action, state))
            .collect()
    }
}
