use std::process;

use furi_core::{Endpoint, HighlightSet, Settings};

use super::make_annotator;

/// The tool-window form: annotate one piece of input text and print the markup.
/// Exits with status 1 when a fallback message was printed instead.
pub fn annotate_cmd(settings: &Settings, text: &str, endpoint: Endpoint, highlights: &[String]) {
    let annotator = make_annotator(settings).with_endpoint(endpoint);
    let highlights: HighlightSet = highlights.iter().map(String::as_str).collect();
    let annotation = annotator.annotate(text, &highlights);
    println!("{}", annotation.html);
    if annotation.is_fallback() {
        process::exit(1);
    }
}
