mod proptest_fsm;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use furi_core::{
    AnnotationCache, AnnotationError, AnnotationService, Endpoint, RemoteResult, Settings, Token,
};

use super::types::{EventTarget, Rect, SelectionEvent, SelectionGeometry};
use super::SelectionController;

pub(super) fn make_controller() -> (SelectionController, Arc<AnnotationCache>) {
    let cache = Arc::new(AnnotationCache::new());
    let controller = SelectionController::new(Arc::clone(&cache), &Settings::default());
    (controller, cache)
}

pub(super) fn geometry() -> SelectionGeometry {
    SelectionGeometry {
        bounds: Rect {
            left: 100.0,
            top: 200.0,
            width: 60.0,
            height: 20.0,
        },
        scroll_x: 0.0,
        scroll_y: 500.0,
    }
}

pub(super) fn select(text: &str) -> SelectionEvent {
    SelectionEvent::SelectionEnd {
        text: text.to_string(),
        geometry: geometry(),
        target: EventTarget::Page,
    }
}

pub(super) fn trigger(text: &str) -> SelectionEvent {
    SelectionEvent::TriggerActivated {
        text: text.to_string(),
    }
}

pub(super) fn ready(request: u64, html: &str) -> SelectionEvent {
    SelectionEvent::AnnotationReady {
        request,
        html: html.to_string(),
    }
}

pub(super) fn taberu_tokens() -> Vec<Token> {
    vec![Token::annotated("食べ", "食", "た", "べ"), Token::plain("る")]
}

/// Scripted service with an optional per-text delay.
#[derive(Default)]
pub(super) struct SlowService {
    answers: Mutex<HashMap<String, (Duration, Result<RemoteResult, AnnotationError>)>>,
}

impl SlowService {
    pub(super) fn answer(&self, text: &str, delay: Duration, result: Result<RemoteResult, AnnotationError>) {
        self.answers
            .lock()
            .unwrap()
            .insert(text.to_string(), (delay, result));
    }
}

impl AnnotationService for SlowService {
    fn request(&self, _endpoint: Endpoint, text: &str) -> Result<RemoteResult, AnnotationError> {
        let answer = self.answers.lock().unwrap().get(text).cloned();
        match answer {
            Some((delay, result)) => {
                std::thread::sleep(delay);
                result
            }
            None => Err(AnnotationError::Network(format!("no answer for {text}"))),
        }
    }
}
