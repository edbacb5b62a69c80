//! Property-based tests for the SelectionController state machine.
//!
//! Generates random event sequences via proptest and verifies that
//! structural invariants hold after every event.

use proptest::prelude::*;

use furi_core::{CacheKey, HighlightSet};

use super::{geometry, make_controller};
use crate::types::{
    ButtonAction, EventTarget, PopupAction, SelectionEvent, UiResponse, UiState,
};
use crate::SelectionController;

// ---------------------------------------------------------------------------
// Event model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Select(&'static str),
    SelectOnPopup,
    Trigger(&'static str),
    ClickPage,
    ClickPopup,
    /// Deliver a completion for the pending request, or for an older one.
    Complete { stale: bool },
    Speak,
    Precache(&'static str),
}

fn arb_text() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["食べる", "猫", "カタカナ", "hello", "", "  ", "123 漢字"])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        20 => arb_text().prop_map(Action::Select),
        3 => Just(Action::SelectOnPopup),
        20 => arb_text().prop_map(Action::Trigger),
        8 => Just(Action::ClickPage),
        4 => Just(Action::ClickPopup),
        15 => any::<bool>().prop_map(|stale| Action::Complete { stale }),
        4 => Just(Action::Speak),
        3 => arb_text().prop_map(Action::Precache),
    ]
}

// ---------------------------------------------------------------------------
// Execute an Action against the controller
// ---------------------------------------------------------------------------

fn execute_action(
    controller: &mut SelectionController,
    cache: &furi_core::AnnotationCache,
    action: &Action,
    issued: &[u64],
) -> Option<UiResponse> {
    match action {
        Action::Select(text) => Some(controller.handle(SelectionEvent::SelectionEnd {
            text: text.to_string(),
            geometry: geometry(),
            target: EventTarget::Page,
        })),
        Action::SelectOnPopup => Some(controller.handle(SelectionEvent::SelectionEnd {
            text: "食べる".to_string(),
            geometry: geometry(),
            target: EventTarget::Popup,
        })),
        Action::Trigger(text) => Some(controller.handle(SelectionEvent::TriggerActivated {
            text: text.to_string(),
        })),
        Action::ClickPage => Some(controller.handle(SelectionEvent::PointerDown {
            target: EventTarget::Page,
        })),
        Action::ClickPopup => Some(controller.handle(SelectionEvent::PointerDown {
            target: EventTarget::Popup,
        })),
        Action::Complete { stale } => {
            let request = if *stale {
                *issued.iter().rev().nth(1)?
            } else {
                *issued.last()?
            };
            Some(controller.handle(SelectionEvent::AnnotationReady {
                request,
                html: format!("html-{request}"),
            }))
        }
        Action::Speak => Some(controller.handle(SelectionEvent::SpeakRequested)),
        Action::Precache(text) => {
            cache.set(CacheKey::new(text.trim(), &HighlightSet::new()), format!("cached-{text}"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every event
// ---------------------------------------------------------------------------

fn assert_invariants(
    controller: &SelectionController,
    before: &UiState,
    resp: &UiResponse,
    action: &Action,
    issued: &[u64],
) {
    let state = controller.state();

    // 1. A selection without Japanese text never shows the button.
    if let Action::Select(text) = action {
        if !furi_core::unicode::contains_japanese(text) {
            assert_eq!(state, &UiState::Idle, "non-Japanese selection after {:?}", action);
            assert_ne!(resp.button, ButtonAction::Show(Default::default()));
        } else {
            assert!(
                matches!(state, UiState::ButtonVisible { .. }),
                "Japanese selection must show the button, got {:?}",
                state
            );
        }
    }

    // 2. A completion only changes the popup when it matches the pending request.
    if let Action::Complete { .. } = action {
        let applied = !resp.is_unchanged();
        if applied {
            assert!(matches!(before, UiState::PopupLoading { .. }));
            assert!(matches!(state, UiState::PopupShown { .. }));
        } else {
            assert_eq!(state, before, "discarded completion must not change state");
        }
    }

    // 3. A stale completion never reaches the popup.
    if let (Action::Complete { stale: true }, UiState::PopupLoading { request, .. }) = (action, before) {
        if issued.last() == Some(request) {
            assert_eq!(state, before);
        }
    }

    // 4. A request is only emitted when entering PopupLoading with that id.
    if let Some(request) = &resp.request {
        match state {
            UiState::PopupLoading { request: id, text, .. } => {
                assert_eq!(*id, request.id);
                assert_eq!(text, &request.text);
            }
            other => panic!("request emitted but state is {:?}", other),
        }
        assert!(matches!(resp.popup, PopupAction::Loading { .. }));
    }

    // 5. Loading state always has a non-empty, trimmed text.
    if let Some(text) = state.popup_text() {
        assert!(!text.is_empty());
        assert_eq!(text, text.trim());
    }

    // 6. Idle hides everything that changed.
    if state == &UiState::Idle && !resp.is_unchanged() {
        assert_eq!(resp.button, ButtonAction::Hide);
        assert_eq!(resp.popup, PopupAction::Hide);
    }

    // 7. Events on our own UI never change state.
    if matches!(action, Action::SelectOnPopup | Action::ClickPopup | Action::Speak) {
        assert_eq!(state, before);
    }

    // 8. Speech only while a popup is visible.
    if resp.speak.is_some() {
        assert!(state.popup_text().is_some());
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn controller_invariants_hold(actions in prop::collection::vec(arb_action(), 1..100)) {
        let (mut controller, cache) = make_controller();
        let mut issued: Vec<u64> = Vec::new();
        for action in &actions {
            let before = controller.state().clone();
            if let Some(resp) = execute_action(&mut controller, &cache, action, &issued) {
                assert_invariants(&controller, &before, &resp, action, &issued);
                if let Some(request) = &resp.request {
                    issued.push(request.id);
                }
            }
        }
    }
}
