use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use furi_core::batch::{BatchOrchestrator, BatchReport, MarkupElement};
use furi_core::{AnnotationService, Annotator, Endpoint, HttpClient, Settings};
use tracing::info;

use super::annotator_with;

/// Treat each non-blank line as one element's markup and re-annotate it.
/// Blank lines pass through untouched.
pub fn run_batch(annotator: &Annotator, input: &str) -> (String, BatchReport) {
    let lines: Vec<&str> = input.lines().collect();
    let mut elements: Vec<MarkupElement> = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| MarkupElement::new(*line))
        .collect();

    let report = BatchOrchestrator::new(annotator).run(&mut elements);

    let mut rendered = elements.into_iter().map(MarkupElement::into_markup);
    let output: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                rendered.next().unwrap_or_default()
            }
        })
        .collect();
    (output.join("\n"), report)
}

/// Batch runs always ask for raw tokens: pre-rendered markup cannot carry the
/// element's highlights.
pub fn batch_annotator(settings: &Settings, service: Arc<dyn AnnotationService>) -> Annotator {
    annotator_with(settings, service).with_endpoint(Endpoint::Analyze)
}

pub fn batch_cmd(settings: &Settings, input_file: &Path, output_file: Option<&Path>) {
    let input = die!(
        fs::read_to_string(input_file),
        "Error reading {}: {}",
        input_file.display()
    );
    let client = HttpClient::from_settings(&settings.service);
    let annotator = batch_annotator(settings, Arc::new(client));
    info!(file = %input_file.display(), "batch start");
    let (output, report) = run_batch(&annotator, &input);

    match output_file {
        Some(path) => die!(
            fs::write(path, format!("{output}\n")),
            "Error writing {}: {}",
            path.display()
        ),
        None => println!("{output}"),
    }
    eprintln!(
        "processed {} elements, {} fallbacks, {} from cache",
        report.processed, report.fallbacks, report.cache_hits
    );
}
