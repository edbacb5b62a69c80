//! Selection-triggered annotation controller.
//!
//! `SelectionController` owns the trigger button / popup state and processes
//! each selection, pointer and completion event, returning responses that the
//! host translates into DOM updates. Network work is handed back to the caller
//! as an `AnnotationRequest`; `AnnotationWorker` runs it in the background and
//! `SelectionRuntime` wires the two together.

pub(crate) mod types;

mod handlers;
mod runtime;
mod worker;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use furi_core::settings::{Settings, SpeechSettings, UiSettings};
use furi_core::AnnotationCache;

pub use runtime::SelectionRuntime;
pub use types::{
    AnnotationRequest, ButtonAction, EventTarget, PopupAction, Position, Rect, RequestId,
    SelectionEvent, SelectionGeometry, UiResponse, UiState,
};
pub use worker::{AnnotationResult, AnnotationWorker};

/// State machine for one page: exactly one active selection at a time.
pub struct SelectionController {
    cache: Arc<AnnotationCache>,
    ui: UiSettings,
    speech: SpeechSettings,

    state: UiState,
    /// Last id handed out; ids start at 1.
    last_request: RequestId,
}

impl SelectionController {
    pub fn new(cache: Arc<AnnotationCache>, settings: &Settings) -> Self {
        Self {
            cache,
            ui: settings.ui.clone(),
            speech: settings.speech.clone(),
            state: UiState::Idle,
            last_request: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == UiState::Idle
    }

    /// Id of the request the popup is currently waiting for.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.state {
            UiState::PopupLoading { request, .. } => Some(request),
            _ => None,
        }
    }

    /// Centered horizontally over the selection, `button_offset` above it.
    fn button_position(&self, geometry: &SelectionGeometry) -> Position {
        let bounds = &geometry.bounds;
        Position {
            x: bounds.left + geometry.scroll_x + bounds.width / 2.0 - self.ui.button_size / 2.0,
            y: bounds.top + geometry.scroll_y - self.ui.button_offset,
        }
    }

    /// Directly under the trigger button.
    fn popup_position(&self, anchor: Position) -> Position {
        Position {
            x: anchor.x,
            y: anchor.y + self.ui.button_size + self.ui.popup_gap,
        }
    }
}
