//! The invitation flow controller.

use std::sync::Arc;

use invitation_core::{
    InvitationRecord, InvitationStatus, InvitationStore, PreferenceChoice, RecordPatch,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::config::{FlowConfig, Viewport};
use crate::dispatch::{WriteDispatcher, WriteHandle};
use crate::error::{FlowAction, FlowError};
use crate::evasive::EvasiveControl;
use crate::state::FlowState;
use crate::step::FlowStep;

/// Drives one recipient through one invitation.
///
/// Commands are plain synchronous methods; the host maps its own events
/// onto them. Store writes are dispatched in the background and never
/// gate a transition. Methods that write must be called from inside a
/// Tokio runtime.
pub struct FlowController {
    record: InvitationRecord,
    state: FlowState,
    config: FlowConfig,
    viewport: Viewport,
    writer: WriteDispatcher,
    rng: Box<dyn RngCore + Send>,
}

impl FlowController {
    /// Create a controller for an already loaded record.
    pub fn new(
        invitation_id: impl Into<String>,
        record: InvitationRecord,
        store: Arc<dyn InvitationStore>,
    ) -> Self {
        Self::with_config(invitation_id, record, store, FlowConfig::default())
    }

    /// Create a controller with custom tunables.
    pub fn with_config(
        invitation_id: impl Into<String>,
        record: InvitationRecord,
        store: Arc<dyn InvitationStore>,
        config: FlowConfig,
    ) -> Self {
        let invitation_id: String = invitation_id.into();
        Self {
            state: FlowState::new(&config.evasive),
            viewport: config.viewport,
            writer: WriteDispatcher::new(store, invitation_id.as_str()),
            rng: Box::new(StdRng::from_entropy()),
            record,
            config,
        }
    }

    /// Replace the randomness used to place the "No" control.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn record(&self) -> &InvitationRecord {
        &self.record
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn step(&self) -> FlowStep {
        self.state.step
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Report the size of the region the "No" control moves within.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Width of the "Yes" control for the current press count.
    pub fn yes_button_width(&self) -> f64 {
        self.state.no_control.yes_width(&self.config.evasive)
    }

    /// Move forward through the reveal steps, skipping absent ones.
    pub fn advance(&mut self) -> Result<FlowStep, FlowError> {
        let from = self.state.step;
        let next = from
            .next_for(&self.record)
            .ok_or_else(|| self.invalid(FlowAction::Advance))?;

        self.state.step = next;
        debug!(from = %from, to = %next, "Flow advanced");
        Ok(next)
    }

    /// Press the "No" control: it jumps and shrinks, nothing is recorded.
    pub fn record_no(&mut self) -> Result<&EvasiveControl, FlowError> {
        self.require_step(FlowStep::Question, FlowAction::RecordNo)?;

        self.state
            .no_control
            .press(&mut *self.rng, self.viewport, &self.config.evasive);

        let control = &self.state.no_control;
        debug!(
            no_count = control.presses(),
            scale = control.scale(),
            "No control evaded"
        );
        Ok(control)
    }

    /// Press "Yes": celebrate, write `accepted`, and arm the step timer.
    ///
    /// The flow moves to preferences once the accept delay has passed (see
    /// [`tick`](Self::tick)), whatever happens to the write. The timer
    /// cannot be cancelled.
    pub fn accept_and_advance(&mut self) -> Result<WriteHandle, FlowError> {
        self.require_step(FlowStep::Question, FlowAction::Accept)?;
        if self.state.yes_pressed {
            return Err(FlowError::AlreadyAccepted);
        }
        if self.state.rejection_sent {
            return Err(FlowError::AlreadyRejected);
        }

        self.state.yes_pressed = true;
        self.state.confetti_shown = true;
        self.state.accept_deadline = Some(Instant::now() + self.config.accept_delay);

        info!(
            no_count = self.state.no_control.presses(),
            "Invitation accepted"
        );
        Ok(self
            .writer
            .dispatch(RecordPatch::status(InvitationStatus::Accepted)))
    }

    /// Apply the acceptance timer against the current time.
    pub fn tick(&mut self) -> FlowStep {
        self.tick_at(Instant::now())
    }

    /// Apply the acceptance timer against `now`.
    pub fn tick_at(&mut self, now: Instant) -> FlowStep {
        if let Some(deadline) = self.state.accept_deadline {
            if now >= deadline && self.state.step == FlowStep::Question {
                self.state.accept_deadline = None;
                self.state.step = FlowStep::Preferences;
                debug!(to = %FlowStep::Preferences, "Accept delay elapsed");
            }
        }
        self.state.step
    }

    /// Wait out a pending acceptance timer, then tick.
    pub async fn settle(&mut self) -> FlowStep {
        if let Some(deadline) = self.state.accept_deadline {
            sleep_until(deadline).await;
        }
        self.tick()
    }

    /// Choose one value in one preference category. Never writes.
    pub fn set_preference(&mut self, choice: PreferenceChoice) -> Result<(), FlowError> {
        self.require_step(FlowStep::Preferences, FlowAction::SetPreference)?;
        self.state.preferences.set(choice);
        Ok(())
    }

    /// Whether the continue affordance is enabled.
    pub fn can_submit(&self) -> bool {
        self.state.step == FlowStep::Preferences && self.state.preferences.complete().is_some()
    }

    /// Write the chosen preferences and finish at the summary.
    ///
    /// Issues exactly one merge carrying all three categories. The move to
    /// summary does not wait on the write.
    pub fn submit_preferences(&mut self) -> Result<WriteHandle, FlowError> {
        self.require_step(FlowStep::Preferences, FlowAction::SubmitPreferences)?;

        let draft = self.state.preferences;
        let preferences = match draft.complete() {
            Some(preferences) => preferences,
            None => {
                let missing = draft.first_missing().unwrap_or("preferences");
                return Err(FlowError::PreferencesIncomplete(missing));
            }
        };

        self.state.step = FlowStep::Summary;
        info!(
            treat = %preferences.treat,
            date = %preferences.date,
            time = %preferences.time,
            "Preferences submitted"
        );
        Ok(self.writer.dispatch(RecordPatch::preferences(preferences)))
    }

    /// Write `rejected` for this invitation.
    ///
    /// Only callable before "Yes" is pressed. The "No" control never calls
    /// this; it only evades.
    pub fn reject(&mut self) -> Result<WriteHandle, FlowError> {
        if self.state.step > FlowStep::Question {
            return Err(self.invalid(FlowAction::Reject));
        }
        if self.state.yes_pressed {
            return Err(FlowError::AlreadyAccepted);
        }
        if self.state.rejection_sent {
            return Err(FlowError::AlreadyRejected);
        }

        self.state.rejection_sent = true;
        info!("Invitation rejected");
        Ok(self
            .writer
            .dispatch(RecordPatch::status(InvitationStatus::Rejected)))
    }

    /// Closing lines shown on the summary step.
    pub fn summary_lines(&self) -> Option<Vec<String>> {
        if self.state.step != FlowStep::Summary {
            return None;
        }
        let preferences = self.state.preferences.complete()?;
        Some(vec![
            format!(
                "{} said YES to {}!",
                self.record.recipient_name, self.record.sender_name
            ),
            format!("A {} {} date", preferences.time, preferences.date),
            format!("With lots of {}", preferences.treat),
        ])
    }

    fn require_step(&self, step: FlowStep, action: FlowAction) -> Result<(), FlowError> {
        if self.state.step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: FlowAction) -> FlowError {
        FlowError::InvalidAction {
            action,
            step: self.state.step,
        }
    }
}

impl std::fmt::Debug for FlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowController")
            .field("record", &self.record)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}
