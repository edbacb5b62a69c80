//! Re-annotate a collection of host elements in place.

use tracing::{debug, debug_span, info};

use crate::highlight::HighlightSet;
use crate::markup;
use crate::pipeline::{AnnotationSource, Annotator};

/// A page element the batch run can read and rewrite.
pub trait HostElement {
    fn text_content(&self) -> String;

    /// Surfaces previously emphasized with `style` inside this element.
    fn highlights(&self, style: &str) -> HighlightSet;

    fn replace_content(&mut self, html: String);
}

/// In-memory element backed by a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    markup: String,
}

impl MarkupElement {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl HostElement for MarkupElement {
    fn text_content(&self) -> String {
        markup::text_content(&self.markup)
    }

    fn highlights(&self, style: &str) -> HighlightSet {
        markup::extract_highlights(&self.markup, style)
    }

    fn replace_content(&mut self, html: String) {
        self.markup = html;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub cache_hits: usize,
    pub fallbacks: usize,
}

pub struct BatchOrchestrator<'a> {
    annotator: &'a Annotator,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(annotator: &'a Annotator) -> Self {
        Self { annotator }
    }

    /// Elements are processed one after another; each is replaced exactly once
    /// with its own result, and a failed element gets fallback markup without
    /// stopping the run.
    pub fn run<E: HostElement>(&self, elements: &mut [E]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, element) in elements.iter_mut().enumerate() {
            let _span = debug_span!("element", index).entered();
            let text = element.text_content();
            let highlights = element.highlights(self.annotator.highlight_style());
            debug!(highlights = highlights.len(), "annotating element");

            let annotation = self.annotator.annotate(&text, &highlights);
            match annotation.source {
                AnnotationSource::Cache => report.cache_hits += 1,
                AnnotationSource::Fallback(_) => report.fallbacks += 1,
                AnnotationSource::Service => {}
            }
            element.replace_content(annotation.html);
            report.processed += 1;
        }
        info!(
            processed = report.processed,
            fallbacks = report.fallbacks,
            "batch finished"
        );
        report
    }
}
