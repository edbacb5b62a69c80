use furi_core::speech::Utterance;
use furi_core::unicode::contains_japanese;
use furi_core::{CacheKey, HighlightSet};
use tracing::{debug, debug_span};

use super::types::{
    AnnotationRequest, ButtonAction, EventTarget, PopupAction, RequestId, SelectionEvent,
    SelectionGeometry, UiResponse, UiState,
};
use super::SelectionController;

impl SelectionController {
    /// Apply one event. The returned response describes what the host must
    /// change; `UiResponse::is_unchanged` means nothing to do.
    pub fn handle(&mut self, event: SelectionEvent) -> UiResponse {
        let _span = debug_span!("handle", ?event).entered();

        match event {
            SelectionEvent::SelectionEnd {
                text,
                geometry,
                target,
            } => self.on_selection_end(&text, &geometry, target),

            SelectionEvent::PointerDown { target } => match target {
                EventTarget::Page => self.dismiss(),
                EventTarget::TriggerButton | EventTarget::Popup => UiResponse::unchanged(),
            },

            SelectionEvent::TriggerActivated { text } => self.on_trigger(&text),

            SelectionEvent::AnnotationReady { request, html } => self.on_annotation(request, html),

            SelectionEvent::SpeakRequested => self.on_speak(),
        }
    }

    /// Hide button and popup. Any outstanding request becomes stale.
    pub fn dismiss(&mut self) -> UiResponse {
        self.state = UiState::Idle;
        UiResponse::hidden()
    }

    fn on_selection_end(
        &mut self,
        text: &str,
        geometry: &SelectionGeometry,
        target: EventTarget,
    ) -> UiResponse {
        // Releasing the pointer over our own button or popup is not a new selection.
        if target != EventTarget::Page {
            return UiResponse::unchanged();
        }

        let text = text.trim();
        if text.is_empty() || !contains_japanese(text) {
            return self.dismiss();
        }

        let position = self.button_position(geometry);
        self.state = UiState::ButtonVisible { position };
        let mut resp = UiResponse::unchanged();
        resp.button = ButtonAction::Show(position);
        resp.popup = PopupAction::Hide;
        resp
    }

    fn on_trigger(&mut self, text: &str) -> UiResponse {
        let Some(anchor) = self.state.button_position() else {
            return UiResponse::unchanged();
        };
        let text = text.trim();
        if text.is_empty() {
            return UiResponse::unchanged();
        }

        let position = self.popup_position(anchor);
        let mut resp = UiResponse::unchanged();

        if let Some(html) = self.cache.get(&CacheKey::new(text, &HighlightSet::new())) {
            debug!("cache hit, showing popup synchronously");
            self.state = UiState::PopupShown {
                text: text.to_string(),
                html: html.clone(),
                anchor,
            };
            resp.popup = PopupAction::Show { position, html };
            return resp;
        }

        self.last_request += 1;
        let id = self.last_request;
        self.state = UiState::PopupLoading {
            text: text.to_string(),
            request: id,
            anchor,
        };
        resp.popup = PopupAction::Loading {
            position,
            message: self.ui.loading_message.clone(),
        };
        resp.request = Some(AnnotationRequest {
            id,
            text: text.to_string(),
        });
        resp
    }

    fn on_annotation(&mut self, request: RequestId, html: String) -> UiResponse {
        let UiState::PopupLoading {
            text,
            request: expected,
            anchor,
        } = &self.state
        else {
            debug!(request, "discarding annotation, popup not loading");
            return UiResponse::unchanged();
        };
        if *expected != request {
            debug!(request, expected, "discarding stale annotation");
            return UiResponse::unchanged();
        }

        let anchor = *anchor;
        self.state = UiState::PopupShown {
            text: text.clone(),
            html: html.clone(),
            anchor,
        };
        let mut resp = UiResponse::unchanged();
        resp.popup = PopupAction::Show {
            position: self.popup_position(anchor),
            html,
        };
        resp
    }

    fn on_speak(&mut self) -> UiResponse {
        let mut resp = UiResponse::unchanged();
        if let Some(text) = self.state.popup_text() {
            resp.speak = Some(Utterance::new(text, &self.speech));
        }
        resp
    }
}
