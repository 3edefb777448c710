//! Integration tests for the recipient flow.
//!
//! All tests run against the in-memory stores from `mock-store`; timer
//! tests use paused Tokio time so the accept delay is exact.
//!
//!   cargo test -p invitation-flow --test flow_tests

use std::sync::Arc;
use std::time::Duration;

use invitation_core::{
    DateIdea, DatePreferences, InvitationDraft, InvitationRecord, InvitationStatus, MealTime,
    PreferenceChoice, Treat,
};
use invitation_flow::{FlowAction, FlowController, FlowError, FlowStep, Viewport};
use mock_store::{DelayedStore, FailingStore, InvitationStore, MemoryStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

const ID: &str = "inv-1";

fn record(memory: Option<&str>, song: Option<&str>) -> InvitationRecord {
    let mut draft = InvitationDraft::new("Sam", "Ana", "hi");
    if let Some(memory) = memory {
        draft = draft.with_memory(memory);
    }
    if let Some(song) = song {
        draft = draft.with_song_link(song);
    }
    draft.into_record(1_707_868_800_000).unwrap()
}

async fn seeded(record: InvitationRecord) -> (MemoryStore, FlowController) {
    let store = MemoryStore::new();
    store.insert(ID, record.clone()).await;
    let flow = FlowController::new(ID, record, Arc::new(store.clone()))
        .with_rng(StdRng::seed_from_u64(14));
    (store, flow)
}

fn choose_all(flow: &mut FlowController) {
    flow.set_preference(PreferenceChoice::Treat(Treat::Chocolates))
        .unwrap();
    flow.set_preference(PreferenceChoice::Date(DateIdea::Dinner))
        .unwrap();
    flow.set_preference(PreferenceChoice::Time(MealTime::Dinner))
        .unwrap();
}

/// Advance until the question step, recording every step visited.
fn walk_to_question(flow: &mut FlowController) -> Vec<FlowStep> {
    let mut visited = vec![flow.step()];
    while flow.step() != FlowStep::Question {
        visited.push(flow.advance().unwrap());
    }
    visited
}

// ============================================================================
// Step sequencing
// ============================================================================

mod sequencing {
    use super::*;

    #[tokio::test]
    async fn test_no_extras_goes_straight_to_question() {
        let (_, mut flow) = seeded(record(None, None)).await;
        assert_eq!(flow.advance().unwrap(), FlowStep::Question);
    }

    #[tokio::test]
    async fn test_memory_only_sequence() {
        let (_, mut flow) = seeded(record(Some("the rooftop"), None)).await;
        assert_eq!(
            walk_to_question(&mut flow),
            vec![FlowStep::Welcome, FlowStep::Memory, FlowStep::Question]
        );
    }

    #[tokio::test]
    async fn test_song_only_sequence() {
        let (_, mut flow) = seeded(record(None, Some("https://open.spotify.com/track/x"))).await;
        assert_eq!(
            walk_to_question(&mut flow),
            vec![FlowStep::Welcome, FlowStep::Media, FlowStep::Question]
        );
    }

    #[tokio::test]
    async fn test_full_sequence() {
        let (_, mut flow) = seeded(record(
            Some("the rooftop"),
            Some("https://open.spotify.com/track/x"),
        ))
        .await;
        assert_eq!(
            walk_to_question(&mut flow),
            vec![
                FlowStep::Welcome,
                FlowStep::Memory,
                FlowStep::Media,
                FlowStep::Question
            ]
        );
    }

    #[tokio::test]
    async fn test_advance_refused_at_question() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();

        let err = flow.advance().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidAction {
                action: FlowAction::Advance,
                step: FlowStep::Question
            }
        );
        assert_eq!(flow.step(), FlowStep::Question);
        assert!(store.merges().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_visits_exactly_four_steps() {
        let (store, mut flow) = seeded(record(None, None)).await;
        let mut visited = vec![flow.step()];

        visited.push(flow.advance().unwrap());
        flow.accept_and_advance().unwrap();
        visited.push(flow.settle().await);
        choose_all(&mut flow);
        flow.submit_preferences().unwrap().outcome().await.unwrap();
        visited.push(flow.step());

        assert_eq!(
            visited,
            vec![
                FlowStep::Welcome,
                FlowStep::Question,
                FlowStep::Preferences,
                FlowStep::Summary
            ]
        );

        let stored = store.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(InvitationStatus::Accepted));
        assert!(stored.preferences.is_some());
    }

    #[tokio::test]
    async fn test_summary_is_terminal() {
        let (_, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        flow.accept_and_advance().unwrap();
        flow.tick_at(tokio::time::Instant::now() + Duration::from_secs(3));
        choose_all(&mut flow);
        flow.submit_preferences().unwrap();

        assert!(flow.advance().is_err());
        assert!(flow.record_no().is_err());
        assert!(flow.accept_and_advance().is_err());
        assert!(flow.submit_preferences().is_err());
        assert!(flow.reject().is_err());
        assert_eq!(flow.step(), FlowStep::Summary);
        assert_eq!(
            flow.summary_lines().unwrap(),
            vec![
                "Ana said YES to Sam!".to_string(),
                "A dinner dinner date".to_string(),
                "With lots of chocolates".to_string(),
            ]
        );
    }
}

// ============================================================================
// Evasive "No" control
// ============================================================================

mod evasive {
    use super::*;

    #[tokio::test]
    async fn test_record_no_only_in_question() {
        let (_, mut flow) = seeded(record(Some("x"), None)).await;
        assert!(matches!(
            flow.record_no(),
            Err(FlowError::InvalidAction {
                action: FlowAction::RecordNo,
                step: FlowStep::Welcome
            })
        ));
    }

    #[tokio::test]
    async fn test_record_no_stays_in_bounds_and_above_floor() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        let floor = flow.config().evasive.scale_floor;
        let control = flow.config().evasive.control;

        let viewports = [
            Viewport::new(448.0, 360.0),
            Viewport::new(120.0, 45.0),
            Viewport::new(1920.0, 1080.0),
        ];
        let mut last_count = 0;
        for n in 0..90 {
            let viewport = viewports[n % viewports.len()];
            flow.set_viewport(viewport);

            let pressed = *flow.record_no().unwrap();
            let pos = pressed.position();
            assert!(pos.x >= 0.0 && pos.x + control.width <= viewport.width);
            assert!(pos.y >= 0.0 && pos.y + control.height <= viewport.height);
            assert!(pressed.scale() >= floor);
            assert_eq!(pressed.presses(), last_count + 1);
            last_count = pressed.presses();
        }

        assert_eq!(flow.step(), FlowStep::Question);
        assert!(store.merges().await.is_empty());
        assert!((flow.yes_button_width() - (100.0 + 20.0 * 90.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_scale_is_non_increasing() {
        let (_, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();

        let mut previous = flow.state().no_control().scale();
        for _ in 0..10 {
            let scale = flow.record_no().unwrap().scale();
            assert!(scale <= previous);
            previous = scale;
        }
        assert!((previous - 0.4).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_no_presses_do_not_block_acceptance() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        for _ in 0..5 {
            flow.record_no().unwrap();
        }

        flow.accept_and_advance().unwrap();
        assert_eq!(flow.settle().await, FlowStep::Preferences);
        assert_eq!(flow.state().no_control().presses(), 5);

        let stored = store.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(InvitationStatus::Accepted));
    }
}

// ============================================================================
// Acceptance and its timer
// ============================================================================

mod acceptance {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_transition_after_exactly_the_delay() {
        let (_, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();

        flow.accept_and_advance().unwrap();
        assert!(flow.state().yes_pressed());
        assert!(flow.state().confetti_shown());
        assert_eq!(flow.tick(), FlowStep::Question);

        tokio::time::advance(Duration::from_millis(1_999)).await;
        assert_eq!(flow.tick(), FlowStep::Question);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(flow.tick(), FlowStep::Preferences);
        assert!(flow.state().accept_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_happens_when_write_fails() {
        let inner = MemoryStore::new();
        let rec = record(None, None);
        inner.insert(ID, rec.clone()).await;
        let store = FailingStore::wrapping(inner);
        let mut flow = FlowController::new(ID, rec, Arc::new(store.clone()));
        flow.advance().unwrap();

        let handle = flow.accept_and_advance().unwrap();
        assert!(handle.outcome().await.is_err());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(flow.tick(), FlowStep::Preferences);
        assert_eq!(store.write_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_does_not_wait_for_slow_write() {
        let inner = MemoryStore::new();
        let rec = record(None, None);
        inner.insert(ID, rec.clone()).await;
        let store = DelayedStore::with_secs(inner.clone(), 10);
        let mut flow = FlowController::new(ID, rec, Arc::new(store));
        flow.advance().unwrap();

        let handle = flow.accept_and_advance().unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(flow.tick(), FlowStep::Preferences);
        assert!(!handle.is_finished());

        handle.outcome().await.unwrap();
        let stored = inner.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(InvitationStatus::Accepted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_during_delay_does_not_cancel_transition() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        flow.accept_and_advance().unwrap().outcome().await.unwrap();

        tokio::time::advance(Duration::from_millis(500)).await;
        let pressed = flow.record_no().unwrap();
        assert_eq!(pressed.presses(), 1);

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(
            flow.advance().unwrap_err(),
            FlowError::InvalidAction {
                action: FlowAction::Advance,
                step: FlowStep::Question
            }
        );
        assert_eq!(flow.reject().unwrap_err(), FlowError::AlreadyAccepted);
        assert!(flow.state().accept_deadline().is_some());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_eq!(flow.tick(), FlowStep::Question);
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(flow.tick(), FlowStep::Preferences);

        let merges = store.merges().await;
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].1.status, Some(InvitationStatus::Accepted));
    }

    #[tokio::test]
    async fn test_second_accept_is_refused_without_writing() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();

        flow.accept_and_advance().unwrap().outcome().await.unwrap();
        assert_eq!(flow.accept_and_advance().unwrap_err(), FlowError::AlreadyAccepted);
        assert_eq!(store.merges().await.len(), 1);
    }
}

// ============================================================================
// Preferences
// ============================================================================

mod preferences {
    use super::*;

    async fn at_preferences() -> (MemoryStore, FlowController) {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        flow.accept_and_advance().unwrap().outcome().await.unwrap();
        flow.tick_at(tokio::time::Instant::now() + Duration::from_secs(2));
        assert_eq!(flow.step(), FlowStep::Preferences);
        (store, flow)
    }

    #[tokio::test]
    async fn test_set_preference_outside_step_is_refused() {
        let (_, mut flow) = seeded(record(None, None)).await;
        let err = flow
            .set_preference(PreferenceChoice::Treat(Treat::Flowers))
            .unwrap_err();
        assert!(matches!(
            err,
            FlowError::InvalidAction {
                action: FlowAction::SetPreference,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_submit_needs_all_three() {
        let (store, mut flow) = at_preferences().await;

        flow.set_preference(PreferenceChoice::Treat(Treat::Flowers))
            .unwrap();
        assert!(!flow.can_submit());
        flow.set_preference(PreferenceChoice::Date(DateIdea::Picnic))
            .unwrap();
        assert!(!flow.can_submit());
        assert_eq!(
            flow.submit_preferences().unwrap_err(),
            FlowError::PreferencesIncomplete("time")
        );
        assert_eq!(flow.step(), FlowStep::Preferences);

        flow.set_preference(PreferenceChoice::Time(MealTime::Lunch))
            .unwrap();
        assert!(flow.can_submit());

        // Only the acceptance write so far.
        assert_eq!(store.merges().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_issues_exactly_one_merge_with_all_fields() {
        let (store, mut flow) = at_preferences().await;
        choose_all(&mut flow);

        let handle = flow.submit_preferences().unwrap();
        assert_eq!(flow.step(), FlowStep::Summary);
        handle.outcome().await.unwrap();

        let expected = DatePreferences {
            treat: Treat::Chocolates,
            date: DateIdea::Dinner,
            time: MealTime::Dinner,
        };
        let preference_writes: Vec<_> = store
            .merges()
            .await
            .into_iter()
            .filter(|(_, patch)| patch.preferences.is_some())
            .collect();
        assert_eq!(preference_writes.len(), 1);
        assert_eq!(preference_writes[0].0, ID);
        assert_eq!(preference_writes[0].1.preferences, Some(expected));
        assert_eq!(preference_writes[0].1.status, None);

        let stored = store.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.preferences, Some(expected));
    }

    #[tokio::test]
    async fn test_submit_reaches_summary_when_write_fails() {
        let inner = MemoryStore::new();
        let rec = record(None, None);
        inner.insert(ID, rec.clone()).await;
        let mut flow = FlowController::new(ID, rec, Arc::new(FailingStore::wrapping(inner)));
        flow.advance().unwrap();
        flow.accept_and_advance().unwrap();
        flow.tick_at(tokio::time::Instant::now() + Duration::from_secs(2));
        choose_all(&mut flow);

        let handle = flow.submit_preferences().unwrap();
        assert_eq!(flow.step(), FlowStep::Summary);
        assert!(handle.outcome().await.is_err());
    }
}

// ============================================================================
// Explicit rejection (not reachable from the "No" control)
// ============================================================================

mod rejection {
    use super::*;

    #[tokio::test]
    async fn test_reject_writes_rejected_and_blocks_accept() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();

        flow.reject().unwrap().outcome().await.unwrap();
        assert!(flow.state().rejection_sent());
        assert_eq!(flow.step(), FlowStep::Question);
        assert_eq!(flow.accept_and_advance().unwrap_err(), FlowError::AlreadyRejected);
        assert_eq!(flow.reject().unwrap_err(), FlowError::AlreadyRejected);

        let stored = store.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(InvitationStatus::Rejected));
    }

    #[tokio::test]
    async fn test_reject_after_accept_is_refused() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        flow.accept_and_advance().unwrap().outcome().await.unwrap();

        assert_eq!(flow.reject().unwrap_err(), FlowError::AlreadyAccepted);
        assert_eq!(store.merges().await.len(), 1);
    }

    #[tokio::test]
    async fn test_no_presses_never_reject() {
        let (store, mut flow) = seeded(record(None, None)).await;
        flow.advance().unwrap();
        for _ in 0..20 {
            flow.record_no().unwrap();
        }

        assert!(!flow.state().rejection_sent());
        let stored = store.get(ID).await.unwrap().unwrap();
        assert_eq!(stored.status, Some(InvitationStatus::Pending));
    }
}
