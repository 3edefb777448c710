//! Session-local flow state.

use invitation_core::{DateIdea, DatePreferences, MealTime, PreferenceChoice, Treat};
use serde::Serialize;
use tokio::time::Instant;

use crate::config::EvasiveConfig;
use crate::evasive::EvasiveControl;
use crate::step::FlowStep;

/// In-progress preference selection. Each category starts unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreferenceDraft {
    pub treat: Option<Treat>,
    pub date: Option<DateIdea>,
    pub time: Option<MealTime>,
}

impl PreferenceDraft {
    /// Select one value, replacing any earlier choice in that category.
    pub fn set(&mut self, choice: PreferenceChoice) {
        match choice {
            PreferenceChoice::Treat(treat) => self.treat = Some(treat),
            PreferenceChoice::Date(date) => self.date = Some(date),
            PreferenceChoice::Time(time) => self.time = Some(time),
        }
    }

    /// First category still unset, by wire name.
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.treat.is_none() {
            Some("treat")
        } else if self.date.is_none() {
            Some("date")
        } else if self.time.is_none() {
            Some("time")
        } else {
            None
        }
    }

    /// The full preferences once all three categories are chosen.
    pub fn complete(&self) -> Option<DatePreferences> {
        Some(DatePreferences {
            treat: self.treat?,
            date: self.date?,
            time: self.time?,
        })
    }
}

/// Everything a viewing session tracks. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub(crate) step: FlowStep,
    pub(crate) no_control: EvasiveControl,
    pub(crate) preferences: PreferenceDraft,
    pub(crate) yes_pressed: bool,
    pub(crate) confetti_shown: bool,
    pub(crate) rejection_sent: bool,
    #[serde(skip)]
    pub(crate) accept_deadline: Option<Instant>,
}

impl FlowState {
    /// Fresh state at the welcome step.
    pub fn new(config: &EvasiveConfig) -> Self {
        Self {
            step: FlowStep::Welcome,
            no_control: EvasiveControl::new(config),
            preferences: PreferenceDraft::default(),
            yes_pressed: false,
            confetti_shown: false,
            rejection_sent: false,
            accept_deadline: None,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn no_control(&self) -> &EvasiveControl {
        &self.no_control
    }

    pub fn preferences(&self) -> &PreferenceDraft {
        &self.preferences
    }

    pub fn yes_pressed(&self) -> bool {
        self.yes_pressed
    }

    pub fn confetti_shown(&self) -> bool {
        self.confetti_shown
    }

    pub fn rejection_sent(&self) -> bool {
        self.rejection_sent
    }

    /// When the pending acceptance moves the flow on, if one is pending.
    pub fn accept_deadline(&self) -> Option<Instant> {
        self.accept_deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_completes_only_with_all_three() {
        let mut draft = PreferenceDraft::default();
        assert_eq!(draft.first_missing(), Some("treat"));

        draft.set(PreferenceChoice::Treat(Treat::Chocolates));
        draft.set(PreferenceChoice::Time(MealTime::Lunch));
        assert_eq!(draft.first_missing(), Some("date"));
        assert!(draft.complete().is_none());

        draft.set(PreferenceChoice::Date(DateIdea::Movie));
        assert_eq!(
            draft.complete(),
            Some(DatePreferences {
                treat: Treat::Chocolates,
                date: DateIdea::Movie,
                time: MealTime::Lunch,
            })
        );
    }

    #[test]
    fn test_later_choice_replaces_earlier() {
        let mut draft = PreferenceDraft::default();
        draft.set(PreferenceChoice::Treat(Treat::Chocolates));
        draft.set(PreferenceChoice::Treat(Treat::Flowers));
        assert_eq!(draft.treat, Some(Treat::Flowers));
    }
}
