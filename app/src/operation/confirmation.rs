use super::{Action, EligibilityRules};
use crate::{error::ControlError, room::OperatingState, room::Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Stop,
    Alert,
    Reset,
}

/// Room progress values a dialog body must surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressField {
    HourNow,
    HourTotal,
}

/// Dialog shown before a STOP or RESET takes effect. Only ever obtained from the
/// resolver; body placeholders are `{room}`, `{hour_now}` and `{hour_total}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationVariant {
    pub tone: Tone,
    pub icon: Icon,
    pub title: &'static str,
    pub body_template: &'static str,
    pub requires_acknowledgement: bool,
    pub progress_fields: &'static [ProgressField],
}

const RUN_PROGRESS: &[ProgressField] = &[ProgressField::HourNow, ProgressField::HourTotal];

const STOP_RUNNING: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Danger,
    icon: Icon::Stop,
    title: "Stop active drying?",
    body_template: "{room} is drying, hour {hour_now} of {hour_total}. Stopping interrupts the cycle and it cannot be resumed.",
    requires_acknowledgement: false,
    progress_fields: RUN_PROGRESS,
};

const STOP_WARM_HOLD: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Warning,
    icon: Icon::Stop,
    title: "End warm hold?",
    body_template: "{room} has finished baking (hour {hour_now} of {hour_total}) and is holding temperature. Stopping ends the hold.",
    requires_acknowledgement: false,
    progress_fields: RUN_PROGRESS,
};

const STOP_WAITING: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Warning,
    icon: Icon::Stop,
    title: "Cancel scheduled start?",
    body_template: "{room} is waiting for a scheduled start. Stopping cancels the pending run.",
    requires_acknowledgement: false,
    progress_fields: &[],
};

const RESET_FAULT: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Danger,
    icon: Icon::Alert,
    title: "Clear fault?",
    body_template: "{room} reported a fault. Confirm the equipment has been inspected and is safe before resetting.",
    requires_acknowledgement: true,
    progress_fields: &[],
};

const RESET_STOPPED: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Neutral,
    icon: Icon::Reset,
    title: "Reset room?",
    body_template: "{room} will be prepared for a new cycle. The last run stopped at hour {hour_now} of {hour_total}.",
    requires_acknowledgement: false,
    progress_fields: RUN_PROGRESS,
};

//only reachable when configured rules permit pairs outside the built-in table
const STOP_OTHER: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Warning,
    icon: Icon::Stop,
    title: "Confirm stop",
    body_template: "Do you want to stop {room}?",
    requires_acknowledgement: false,
    progress_fields: &[],
};

const RESET_OTHER: ConfirmationVariant = ConfirmationVariant {
    tone: Tone::Warning,
    icon: Icon::Reset,
    title: "Confirm reset",
    body_template: "Do you want to reset {room}?",
    requires_acknowledgement: false,
    progress_fields: &[],
};

impl ConfirmationVariant {
    pub fn shows(&self, field: ProgressField) -> bool {
        self.progress_fields.contains(&field)
    }

    pub fn render_body(&self, room: &Room) -> String {
        self.body_template
            .replace("{room}", &room.room_name)
            .replace("{hour_now}", &format_hours(room.hour_now()))
            .replace("{hour_total}", &format_hours(room.hour_total()))
    }
}

fn format_hours(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h.fract() == 0.0 => format!("{}", h as i64),
        Some(h) => format!("{:.1}", h),
        None => "-".to_string(),
    }
}

/// Picks the STOP/RESET dialog against the built-in eligibility table.
pub fn resolve(action: Action, state: OperatingState) -> Result<Option<ConfirmationVariant>, ControlError> {
    ConfirmationResolver::new(&EligibilityRules::default()).resolve(action, state)
}

pub struct ConfirmationResolver<'a> {
    rules: &'a EligibilityRules,
}

impl<'a> ConfirmationResolver<'a> {
    pub fn new(rules: &'a EligibilityRules) -> Self {
        Self { rules }
    }

    /// `None` for START, whose confirmation comes from the schedule. Pairs the rules do
    /// not permit are rejected.
    pub fn resolve(&self, action: Action, state: OperatingState) -> Result<Option<ConfirmationVariant>, ControlError> {
        if !self.rules.permits(action, state) {
            tracing::warn!(%action, %state, "Confirmation requested for a non-permitted action");
            return Err(ControlError::NotPermitted { action, state });
        }

        let variant = match (action, state) {
            (Action::Start, _) => return Ok(None),
            (Action::Stop, OperatingState::Running) => STOP_RUNNING,
            (Action::Stop, OperatingState::WarmHold) => STOP_WARM_HOLD,
            (Action::Stop, OperatingState::Waiting) => STOP_WAITING,
            (Action::Stop, _) => STOP_OTHER,
            (Action::Reset, OperatingState::Fault) => RESET_FAULT,
            (Action::Reset, OperatingState::Stopped) => RESET_STOPPED,
            (Action::Reset, _) => RESET_OTHER,
        };

        Ok(Some(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::fixture;
    use OperatingState::*;

    fn resolved(action: Action, state: OperatingState) -> ConfirmationVariant {
        resolve(action, state).unwrap().unwrap()
    }

    #[test]
    fn start_has_no_variant() {
        assert_eq!(resolve(Action::Start, Ready), Ok(None));
        assert_eq!(resolve(Action::Start, Stopped), Ok(None));
    }

    #[test]
    fn tones_follow_severity() {
        assert_eq!(resolved(Action::Stop, Running).tone, Tone::Danger);
        assert_eq!(resolved(Action::Stop, WarmHold).tone, Tone::Warning);
        assert_eq!(resolved(Action::Stop, Waiting).tone, Tone::Warning);
        assert_eq!(resolved(Action::Reset, Fault).tone, Tone::Danger);
        assert_eq!(resolved(Action::Reset, Stopped).tone, Tone::Neutral);
    }

    #[test]
    fn warning_variants_use_different_copy() {
        assert_ne!(resolved(Action::Stop, WarmHold).title, resolved(Action::Stop, Waiting).title);
    }

    #[test]
    fn only_fault_reset_requires_acknowledgement() {
        for (action, state) in [(Action::Stop, Running), (Action::Stop, WarmHold), (Action::Stop, Waiting), (Action::Reset, Stopped)] {
            assert!(!resolved(action, state).requires_acknowledgement);
        }
        assert!(resolved(Action::Reset, Fault).requires_acknowledgement);
    }

    #[test]
    fn running_and_warm_hold_surface_progress() {
        for state in [Running, WarmHold] {
            let variant = resolved(Action::Stop, state);
            assert!(variant.shows(ProgressField::HourNow));
            assert!(variant.shows(ProgressField::HourTotal));
        }
        assert!(!resolved(Action::Stop, Waiting).shows(ProgressField::HourNow));
    }

    #[test]
    fn non_permitted_pairs_are_rejected() {
        for state in OperatingState::ALL {
            for action in [Action::Stop, Action::Reset] {
                let permitted = crate::operation::is_permitted(action, state);
                assert_eq!(resolve(action, state).is_ok(), permitted, "{} in {}", action, state);
            }
        }

        assert_eq!(
            resolve(Action::Stop, Ready),
            Err(ControlError::NotPermitted {
                action: Action::Stop,
                state: Ready
            })
        );
    }

    #[test]
    fn resolution_is_repeatable() {
        assert_eq!(resolve(Action::Reset, Fault), resolve(Action::Reset, Fault));
    }

    #[test]
    fn body_renders_progress() {
        let room = fixture::room_with_progress("room-1", Running, 3.0, 48.0);

        let body = resolved(Action::Stop, Running).render_body(&room);

        assert_eq!(
            body,
            "Kiln room-1 is drying, hour 3 of 48. Stopping interrupts the cycle and it cannot be resumed."
        );
    }

    #[test]
    fn body_renders_missing_progress_as_dash() {
        let room = fixture::room("room-1", WarmHold);

        let body = resolved(Action::Stop, WarmHold).render_body(&room);

        assert!(body.contains("hour - of -"));
    }

    #[test]
    fn configured_extra_pair_gets_generic_copy() {
        let rules = EligibilityRules {
            stop: vec![Ready],
            ..EligibilityRules::default()
        };

        let variant = ConfirmationResolver::new(&rules).resolve(Action::Stop, Ready).unwrap().unwrap();

        assert_eq!(variant.title, "Confirm stop");
    }
}
