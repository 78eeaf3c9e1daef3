use tokio::sync::mpsc::Sender;

use super::{
    Blocker, Confirmation, RefreshTimer, Repaint, StartConfirmation, Submission, SubmissionTicket, WizardSession,
    WizardStep,
};
use crate::{
    command::{CommandIntent, CommandSubmitter, SubmissionOutcome},
    core::{
        id::{FactoryId, ProfileId, RoomId},
        time::{DateTime, Time},
    },
    error::ControlError,
    operation::{Action, ActionTile, ConfirmationResolver},
    room::{ControlSnapshot, Profile, Room, RoomQuery},
    schedule::{Schedule, ScheduleSummary, StartMode, StartPlan, clamp_shift_hours},
    settings::ControlSettings,
    t,
};

/// Drives one operator through room selection, action selection, start configuration and
/// confirmation. Rooms and profiles are read-only for the controller's lifetime; derived
/// values (tiles, previews, dialogs) are computed on every read.
pub struct WizardController {
    rooms: Vec<Room>,
    profiles: Vec<Profile>,
    settings: ControlSettings,
    query: RoomQuery,
    session: WizardSession,
    last_ticket: u64,
    repaint_tx: Option<Sender<Repaint>>,
    refresh: Option<RefreshTimer>,
}

impl WizardController {
    pub fn new(rooms: Vec<Room>, profiles: Vec<Profile>, settings: ControlSettings) -> Self {
        Self {
            rooms,
            profiles,
            settings,
            query: RoomQuery::all(),
            session: WizardSession::default(),
            last_ticket: 0,
            repaint_tx: None,
            refresh: None,
        }
    }

    pub fn from_snapshot(snapshot: ControlSnapshot, settings: ControlSettings) -> Self {
        Self::new(snapshot.rooms, snapshot.profiles, settings)
    }

    /// Enables the NOW-mode refresh timer. Requires a tokio runtime once the timer starts.
    /// Ticks are dropped while the channel is full.
    pub fn with_repaint(mut self, repaint_tx: Sender<Repaint>) -> Self {
        self.repaint_tx = Some(repaint_tx);
        self
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn step(&self) -> WizardStep {
        self.session.step
    }

    pub fn query(&self) -> &RoomQuery {
        &self.query
    }

    pub fn rooms(&self) -> Vec<&Room> {
        self.query.filter(&self.rooms)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn selected_room(&self) -> Option<&Room> {
        let room_id = self.session.selected_room_id.as_ref()?;
        self.rooms.iter().find(|room| &room.room_id == room_id)
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        let profile_id = self.session.start_form.profile_id.as_ref()?;
        self.profiles.iter().find(|profile| &profile.profile_id == profile_id)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    pub fn set_factory_filter(&mut self, factory: Option<FactoryId>) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::SelectRoom, "set_factory_filter")?;

        if self.query.factory != factory {
            self.query.factory = factory;
            self.clear_room_selection();
        }

        Ok(())
    }

    pub fn set_search_text(&mut self, text: &str) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::SelectRoom, "set_search_text")?;

        self.query.text = text.to_string();

        let still_visible = self.selected_room().is_none_or(|room| self.query.matches(room));
        if !still_visible {
            self.clear_room_selection();
        }

        Ok(())
    }

    pub fn select_room(&mut self, room_id: &RoomId) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::SelectRoom, "select_room")?;

        let Some(room) = self.rooms.iter().find(|room| &room.room_id == room_id) else {
            tracing::warn!("Selected unknown room {}", room_id);
            return Err(ControlError::UnknownRoom {
                room_id: room_id.clone(),
            });
        };

        if !self.query.matches(room) {
            tracing::warn!("Selected room {} outside the current filter", room_id);
            return Err(ControlError::RoomNotListed {
                room_id: room_id.clone(),
            });
        }

        if self.session.selected_room_id.as_ref() != Some(room_id) {
            self.clear_room_selection();
            self.session.selected_room_id = Some(room_id.clone());
            tracing::debug!("Room {} selected", room_id);
        }

        Ok(())
    }

    /// All three actions for the selected room, disabled ones included. Empty until a room
    /// is selected.
    pub fn action_tiles(&self) -> Vec<ActionTile> {
        match self.selected_room() {
            Some(room) => ActionTile::all_for_state(room.state, &self.settings.eligibility),
            None => vec![],
        }
    }

    pub fn select_action(&mut self, action: Action) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::SelectAction, "select_action")?;
        let state = self.require_room()?.state;

        if !self.settings.eligibility.permits(action, state) {
            tracing::warn!("Rejected selection of disabled action {} for state {}", action, state);
            return Err(ControlError::NotPermitted { action, state });
        }

        if self.session.selected_action != Some(action) {
            self.session.selected_action = Some(action);
            self.session.start_form = Default::default();
            self.session.acknowledged = false;
        }

        Ok(())
    }

    pub fn select_profile(&mut self, profile_id: &ProfileId) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::ConfigureStart, "select_profile")?;

        if !self.profiles.iter().any(|profile| &profile.profile_id == profile_id) {
            return Err(ControlError::UnknownProfile {
                profile_id: profile_id.clone(),
            });
        }

        self.session.start_form.profile_id = Some(profile_id.clone());
        Ok(())
    }

    /// Switching to SCHEDULE pre-fills the current clock when none was picked yet.
    pub fn set_start_mode(&mut self, mode: StartMode, now: &DateTime) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::ConfigureStart, "set_start_mode")?;

        let form = &mut self.session.start_form;
        form.start_mode = mode;
        if mode == StartMode::Schedule && form.schedule_clock.is_none() {
            form.schedule_clock = Some(now.time().snapped_to(self.settings.schedule_minute_step));
        }

        self.sync_refresh();
        Ok(())
    }

    /// Accepts free-form "HH:MM". Out-of-range parts are clamped, then snapped down to the
    /// configured minute step.
    pub fn set_schedule_clock(&mut self, value: &str) -> Result<Time, ControlError> {
        self.ensure_step(WizardStep::ConfigureStart, "set_schedule_clock")?;

        let clock = Time::parse_clock(value).snapped_to(self.settings.schedule_minute_step);
        self.session.start_form.schedule_clock = Some(clock);

        Ok(clock)
    }

    pub fn clear_schedule_clock(&mut self) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::ConfigureStart, "clear_schedule_clock")?;

        self.session.start_form.schedule_clock = None;
        Ok(())
    }

    pub fn set_shift_hours(&mut self, shift_hours: i32) -> Result<i32, ControlError> {
        self.ensure_step(WizardStep::ConfigureStart, "set_shift_hours")?;

        let clamped = clamp_shift_hours(shift_hours);
        self.session.start_form.shift_hours = clamped;

        Ok(clamped)
    }

    /// Start/end clocks and countdowns for the form as currently filled in. `None` while
    /// the form is incomplete.
    pub fn start_preview(&self, now: &DateTime) -> Option<ScheduleSummary> {
        let (_, plan) = self.start_plan(now)?;
        Some(Schedule::compute(now, &plan).summary(now))
    }

    pub fn set_acknowledged(&mut self, acknowledged: bool) -> Result<(), ControlError> {
        self.ensure_step(WizardStep::Confirm, "set_acknowledged")?;

        self.session.acknowledged = acknowledged;
        Ok(())
    }

    pub fn confirmation(&self, now: &DateTime) -> Result<Confirmation, ControlError> {
        self.ensure_step(WizardStep::Confirm, "confirmation")?;
        let room = self.require_room()?;
        let action = self.require_action()?;

        if action == Action::Start {
            let (profile, plan) = self.start_plan(now).ok_or(ControlError::GateNotSatisfied {
                step: WizardStep::Confirm,
                blocker: Blocker::NoProfileSelected,
            })?;
            let schedule = Schedule::compute(now, &plan);
            let summary = schedule.summary(now);

            return Ok(Confirmation::Start(StartConfirmation {
                room_id: room.room_id.clone(),
                room_name: room.room_name.clone(),
                profile: profile.clone(),
                schedule,
                summary,
            }));
        }

        let variant = ConfirmationResolver::new(&self.settings.eligibility)
            .resolve(action, room.state)?
            .ok_or(ControlError::NotPermitted {
                action,
                state: room.state,
            })?;
        let body = variant.render_body(room);

        Ok(Confirmation::Operation {
            action,
            room_id: room.room_id.clone(),
            variant,
            body,
        })
    }

    pub fn is_confirm_enabled(&self) -> bool {
        self.session.step == WizardStep::Confirm && !self.session.is_submitting() && self.blockers().is_empty()
    }

    /// Input gaps keeping the current step from being left. Empty means the forward
    /// control is enabled.
    pub fn blockers(&self) -> Vec<Blocker> {
        let mut blockers = vec![];

        match self.session.step {
            WizardStep::SelectRoom => {
                if self.selected_room().is_none() {
                    blockers.push(Blocker::NoRoomSelected);
                }
            }
            WizardStep::SelectAction => match (self.selected_room(), self.session.selected_action) {
                (_, None) => blockers.push(Blocker::NoActionSelected),
                (Some(room), Some(action)) if !self.settings.eligibility.permits(action, room.state) => {
                    blockers.push(Blocker::ActionNotPermitted { action });
                }
                _ => {}
            },
            WizardStep::ConfigureStart => {
                let form = &self.session.start_form;
                if self.selected_profile().is_none() {
                    blockers.push(Blocker::NoProfileSelected);
                }
                if form.start_mode == StartMode::Schedule && form.schedule_clock.is_none() {
                    blockers.push(Blocker::NoScheduleClock);
                }
            }
            WizardStep::Confirm => {
                if self.requires_acknowledgement() && !self.session.acknowledged {
                    blockers.push(Blocker::NotAcknowledged);
                }
            }
        }

        blockers
    }

    pub fn can_proceed(&self) -> bool {
        self.blockers().is_empty()
    }

    /// Moves forward one step. The confirmation gate is only left through submission.
    pub fn next(&mut self) -> Result<WizardStep, ControlError> {
        let step = self.session.step;

        if let Some(blocker) = self.blockers().into_iter().next() {
            tracing::warn!("Rejected advancing from step {}: {}", step, blocker);
            return Err(ControlError::GateNotSatisfied { step, blocker });
        }

        let next = match step {
            WizardStep::SelectRoom => WizardStep::SelectAction,
            WizardStep::SelectAction => match self.require_action()? {
                Action::Start => WizardStep::ConfigureStart,
                Action::Stop | Action::Reset => WizardStep::Confirm,
            },
            WizardStep::ConfigureStart => WizardStep::Confirm,
            WizardStep::Confirm => return Err(ControlError::WrongStep { operation: "next", step }),
        };

        self.enter(next);
        Ok(next)
    }

    /// Moves back one step, keeping earlier selections. Blocked only while a submission is
    /// outstanding.
    pub fn back(&mut self) -> Result<WizardStep, ControlError> {
        if self.session.is_submitting() {
            return Err(ControlError::SubmissionInFlight);
        }

        let previous = match self.session.step {
            WizardStep::SelectRoom | WizardStep::SelectAction => WizardStep::SelectRoom,
            WizardStep::ConfigureStart => WizardStep::SelectAction,
            WizardStep::Confirm => match self.session.selected_action {
                Some(Action::Start) => WizardStep::ConfigureStart,
                _ => WizardStep::SelectAction,
            },
        };

        self.enter(previous);
        Ok(previous)
    }

    /// Closes the wizard. A result arriving later for an outstanding submission is rejected
    /// as stale.
    pub fn abandon(&mut self) {
        if self.session != WizardSession::default() {
            tracing::info!("Wizard abandoned at step {}", self.session.step);
        }

        self.session = WizardSession::default();
        self.sync_refresh();
    }

    /// Freezes the confirmed intent and marks it in flight. The schedule is resolved
    /// against `now`, the instant the operator confirmed. The returned ticket must be
    /// handed back to `complete_submission`.
    pub fn begin_submission(&mut self, now: &DateTime) -> Result<SubmissionTicket, ControlError> {
        self.ensure_step(WizardStep::Confirm, "begin_submission")?;

        if self.session.is_submitting() {
            return Err(ControlError::SubmissionInFlight);
        }

        if let Some(blocker) = self.blockers().into_iter().next() {
            return Err(ControlError::GateNotSatisfied {
                step: WizardStep::Confirm,
                blocker,
            });
        }

        let intent = match self.confirmation(now)? {
            Confirmation::Start(start) => CommandIntent::start(start.room_id, start.profile.profile_id, &start.schedule),
            Confirmation::Operation { action, room_id, .. } => CommandIntent::operation(room_id, action),
        };

        self.last_ticket += 1;
        let ticket = SubmissionTicket::new(self.last_ticket, intent);

        tracing::info!("Submitting {} as #{}", ticket.intent(), ticket.id());
        self.session.submission = Submission::InFlight(ticket.clone());
        self.sync_refresh();

        Ok(ticket)
    }

    /// Success closes the session; failure keeps it at the confirmation gate with the
    /// reason so the operator can retry or cancel. Results for any ticket other than the
    /// one in flight are rejected without touching the session.
    pub fn complete_submission(
        &mut self,
        ticket: &SubmissionTicket,
        result: Result<(), String>,
    ) -> Result<SubmissionOutcome, ControlError> {
        let intent = match std::mem::take(&mut self.session.submission) {
            Submission::InFlight(current) if current.id() == ticket.id() => current.into_intent(),
            other => {
                self.session.submission = other;
                tracing::warn!("Discarding result of stale submission #{} ({})", ticket.id(), ticket.intent());
                return Err(ControlError::StaleSubmission { ticket: ticket.id() });
            }
        };

        match result {
            Ok(()) => {
                tracing::info!("Command {} accepted", intent);
                self.session = WizardSession::default();
                self.sync_refresh();
                Ok(SubmissionOutcome::Accepted(intent))
            }
            Err(reason) => {
                tracing::error!("Command {} failed: {}", intent, reason);
                self.session.submission = Submission::Failed(reason.clone());
                Ok(SubmissionOutcome::Rejected { intent, reason })
            }
        }
    }

    /// Confirms and hands the intent to `submitter` exactly once.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&mut self, submitter: &impl CommandSubmitter) -> Result<SubmissionOutcome, ControlError> {
        let now = t!(now);
        let ticket = self.begin_submission(&now)?;

        let result = submitter.submit(ticket.intent()).await.map_err(|e| format!("{:#}", e));

        self.complete_submission(&ticket, result)
    }

    fn enter(&mut self, step: WizardStep) {
        if self.session.step != step {
            tracing::debug!("Wizard step {} -> {}", self.session.step, step);
        }

        if step != WizardStep::Confirm {
            self.session.acknowledged = false;
            if matches!(self.session.submission, Submission::Failed(_)) {
                self.session.submission = Submission::Idle;
            }
        }

        self.session.step = step;
        self.sync_refresh();
    }

    fn ensure_step(&self, expected: WizardStep, operation: &'static str) -> Result<(), ControlError> {
        if self.session.step != expected {
            tracing::warn!("{} called on step {}, expected {}", operation, self.session.step, expected);
            return Err(ControlError::WrongStep {
                operation,
                step: self.session.step,
            });
        }

        Ok(())
    }

    fn require_room(&self) -> Result<&Room, ControlError> {
        self.selected_room().ok_or(ControlError::GateNotSatisfied {
            step: self.session.step,
            blocker: Blocker::NoRoomSelected,
        })
    }

    fn require_action(&self) -> Result<Action, ControlError> {
        self.session.selected_action.ok_or(ControlError::GateNotSatisfied {
            step: self.session.step,
            blocker: Blocker::NoActionSelected,
        })
    }

    fn requires_acknowledgement(&self) -> bool {
        let (Some(room), Some(action)) = (self.selected_room(), self.session.selected_action) else {
            return false;
        };

        ConfirmationResolver::new(&self.settings.eligibility)
            .resolve(action, room.state)
            .ok()
            .flatten()
            .is_some_and(|variant| variant.requires_acknowledgement)
    }

    fn start_plan(&self, now: &DateTime) -> Option<(&Profile, StartPlan)> {
        if self.session.selected_action != Some(Action::Start) {
            return None;
        }

        let form = &self.session.start_form;
        let profile = self.selected_profile()?;
        let schedule_clock = match form.start_mode {
            StartMode::Now => form.schedule_clock.unwrap_or_else(|| now.time()),
            StartMode::Schedule => form.schedule_clock?,
        };

        Some((
            profile,
            StartPlan {
                total_hours: profile.total_hours,
                mode: form.start_mode,
                schedule_clock,
                shift_hours: form.shift_hours,
            },
        ))
    }

    fn clear_room_selection(&mut self) {
        self.session.selected_room_id = None;
        self.session.selected_action = None;
        self.session.start_form = Default::default();
        self.session.acknowledged = false;
    }

    fn sync_refresh(&mut self) {
        let wanted = self.session.step == WizardStep::ConfigureStart
            && self.session.start_form.start_mode == StartMode::Now
            && !self.session.is_submitting();

        if !wanted {
            self.refresh = None;
            return;
        }

        if self.refresh.is_none() {
            if let Some(repaint_tx) = &self.repaint_tx {
                let timer = RefreshTimer::start(self.settings.now_refresh_interval, repaint_tx.clone());
                self.refresh = Some(timer);
            }
        }
    }
}
