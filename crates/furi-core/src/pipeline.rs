//! Cache → service → renderer, shared by the selection popup and batch runs.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{AnnotationCache, CacheKey};
use crate::client::{AnnotationService, Endpoint};
use crate::error::AnnotationError;
use crate::highlight::HighlightSet;
use crate::settings::{Messages, Settings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationSource {
    Cache,
    Service,
    /// The markup is a fallback message; nothing was cached.
    Fallback(AnnotationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub html: String,
    pub source: AnnotationSource,
}

impl Annotation {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AnnotationSource::Fallback(_))
    }
}

pub struct Annotator {
    service: Arc<dyn AnnotationService>,
    cache: Arc<AnnotationCache>,
    endpoint: Endpoint,
    highlight_style: String,
    messages: Messages,
}

impl Annotator {
    pub fn new(
        service: Arc<dyn AnnotationService>,
        cache: Arc<AnnotationCache>,
        settings: &Settings,
    ) -> Self {
        Self {
            service,
            cache,
            endpoint: settings.service.endpoint,
            highlight_style: settings.render.highlight_style.clone(),
            messages: settings.messages.clone(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn cache(&self) -> &Arc<AnnotationCache> {
        &self.cache
    }

    pub fn highlight_style(&self) -> &str {
        &self.highlight_style
    }

    /// Cache lookup only; never touches the service.
    pub fn cached(&self, text: &str, highlights: &HighlightSet) -> Option<String> {
        self.cache.get(&CacheKey::new(text, highlights))
    }

    /// Run the pipeline, reporting failures to the caller. Only successful
    /// results are stored, so a transient failure does not poison later lookups.
    pub fn try_annotate(
        &self,
        text: &str,
        highlights: &HighlightSet,
    ) -> Result<Annotation, AnnotationError> {
        if text.trim().is_empty() {
            return Err(AnnotationError::NoInput);
        }

        let key = CacheKey::new(text, highlights);
        if let Some(html) = self.cache.get(&key) {
            debug!(chars = text.chars().count(), "cache hit");
            return Ok(Annotation {
                html,
                source: AnnotationSource::Cache,
            });
        }
        debug!(chars = text.chars().count(), "cache miss");

        let result = self.service.request(self.endpoint, text)?;
        let html = result.into_html(highlights, &self.highlight_style);
        self.cache.set(key, html.clone());
        Ok(Annotation {
            html,
            source: AnnotationSource::Service,
        })
    }

    /// Run the pipeline, substituting the matching fallback message on error.
    pub fn annotate(&self, text: &str, highlights: &HighlightSet) -> Annotation {
        self.try_annotate(text, highlights)
            .unwrap_or_else(|e| self.fallback(e))
    }

    /// Visible fallback for `error`. Never cached.
    pub fn fallback(&self, error: AnnotationError) -> Annotation {
        warn!(error = %error, "annotation failed");
        Annotation {
            html: error.fallback_html(&self.messages).to_string(),
            source: AnnotationSource::Fallback(error),
        }
    }
}
