use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use furi_core::{Annotation, Annotator, HighlightSet};
use tracing::{debug, warn};

use crate::types::{AnnotationRequest, RequestId};

#[derive(Debug)]
pub struct AnnotationResult {
    pub id: RequestId,
    pub text: String,
    pub annotation: Annotation,
}

/// Runs annotation requests on a background thread so the caller stays
/// responsive. Only the most recently submitted request is worth finishing:
/// older ones are skipped if still queued and dropped if they complete late.
pub struct AnnotationWorker {
    work_tx: mpsc::Sender<AnnotationRequest>,
    result_rx: Mutex<mpsc::Receiver<AnnotationResult>>,
    latest: Arc<AtomicU64>,
}

impl AnnotationWorker {
    pub fn new(annotator: Arc<Annotator>) -> io::Result<Self> {
        let latest = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<AnnotationRequest>();
        let (result_tx, result_rx) = mpsc::channel::<AnnotationResult>();
        {
            let latest = Arc::clone(&latest);
            thread::Builder::new()
                .name("furi-annotate".into())
                .spawn(move || annotation_worker(result_tx, work_rx, latest, annotator))?;
        }
        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            latest,
        })
    }

    /// Queue `request`. Returns false when the worker thread is gone, in which
    /// case no result will ever arrive for it.
    pub fn submit(&self, request: AnnotationRequest) -> bool {
        self.latest.store(request.id, Ordering::SeqCst);
        match self.work_tx.send(request) {
            Ok(()) => true,
            Err(mpsc::SendError(request)) => {
                warn!(id = request.id, "annotation worker stopped, request dropped");
                false
            }
        }
    }

    /// Mark everything submitted so far as stale.
    pub fn invalidate(&self) {
        self.latest.store(0, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<AnnotationResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<AnnotationResult> {
        let rx = self.result_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

// Parameters drop in reverse order, so `rx` closes before `tx`: once a caller
// sees the result channel disconnected, `submit` already fails.
fn annotation_worker(
    tx: mpsc::Sender<AnnotationResult>,
    rx: mpsc::Receiver<AnnotationRequest>,
    latest: Arc<AtomicU64>,
    annotator: Arc<Annotator>,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple requests queued, skip to the newest
        let mut newest = work;
        while let Ok(newer) = rx.try_recv() {
            newest = newer;
        }

        if newest.id != latest.load(Ordering::SeqCst) {
            debug!(id = newest.id, "skipping superseded request");
            continue;
        }

        let annotation = annotator.annotate(&newest.text, &HighlightSet::new());

        // The pipeline already cached a successful result under its own key;
        // only the popup update is dropped for a superseded request.
        if newest.id != latest.load(Ordering::SeqCst) {
            debug!(id = newest.id, "dropping late result");
            continue;
        }

        if tx
            .send(AnnotationResult {
                id: newest.id,
                text: newest.text,
                annotation,
            })
            .is_err()
        {
            break;
        }
    }
}
