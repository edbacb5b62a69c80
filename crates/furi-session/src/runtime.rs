use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use furi_core::{AnnotationError, Annotator, Settings};

use crate::types::{SelectionEvent, UiResponse};
use crate::worker::AnnotationWorker;
use crate::SelectionController;

/// Controller plus background worker: requests the controller emits are
/// submitted automatically and completions fed back as events.
pub struct SelectionRuntime {
    controller: SelectionController,
    worker: AnnotationWorker,
    annotator: Arc<Annotator>,
}

impl SelectionRuntime {
    pub fn new(annotator: Arc<Annotator>, settings: &Settings) -> io::Result<Self> {
        let controller = SelectionController::new(Arc::clone(annotator.cache()), settings);
        let worker = AnnotationWorker::new(Arc::clone(&annotator))?;
        Ok(Self {
            controller,
            worker,
            annotator,
        })
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn dispatch(&mut self, event: SelectionEvent) -> UiResponse {
        let resp = self.controller.handle(event);
        if let Some(request) = &resp.request {
            if !self.worker.submit(request.clone()) {
                // No result can arrive for this request; settle the popup now.
                let error = AnnotationError::Network("annotation worker stopped".to_string());
                let html = self.annotator.fallback(error).html;
                let mut shown = self.apply(request.id, html);
                shown.button = resp.button;
                shown.request = None;
                return shown;
            }
        } else if self.controller.pending_request().is_none() {
            self.worker.invalidate();
        }
        resp
    }

    /// Apply any finished annotations without blocking. Returns the last
    /// response that changed the popup.
    pub fn poll(&mut self) -> Option<UiResponse> {
        let mut applied = None;
        while let Some(result) = self.worker.try_recv() {
            let resp = self.apply(result.id, result.annotation.html);
            if !resp.is_unchanged() {
                applied = Some(resp);
            }
        }
        applied
    }

    /// Block until the pending annotation is applied or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<UiResponse> {
        let deadline = Instant::now() + timeout;
        while self.controller.pending_request().is_some() {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let result = self.worker.recv_timeout(remaining)?;
            let resp = self.apply(result.id, result.annotation.html);
            if !resp.is_unchanged() {
                return Some(resp);
            }
        }
        None
    }

    fn apply(&mut self, request: u64, html: String) -> UiResponse {
        self.controller
            .handle(SelectionEvent::AnnotationReady { request, html })
    }
}
