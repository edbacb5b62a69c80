use std::path::Path;
use std::process;
use std::sync::Arc;

use furi_core::{AnnotationCache, AnnotationService, Annotator, HttpClient, Settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub mod annotate_ops;
pub mod batch_ops;
pub mod config_ops;
pub mod select_ops;

/// Defaults, or the given file; `base_url` overrides the service address.
pub fn load_settings(config: Option<&Path>, base_url: Option<&str>) -> Settings {
    let mut settings = match config {
        Some(path) => die!(
            Settings::load(path),
            "Error loading settings {}: {}",
            path.display()
        ),
        None => Settings::default(),
    };
    if let Some(url) = base_url {
        settings.service.base_url = url.to_string();
    }
    settings
}

/// HTTP-backed pipeline with a fresh cache for this process.
pub fn make_annotator(settings: &Settings) -> Annotator {
    annotator_with(settings, Arc::new(HttpClient::from_settings(&settings.service)))
}

pub fn annotator_with(settings: &Settings, service: Arc<dyn AnnotationService>) -> Annotator {
    Annotator::new(service, Arc::new(AnnotationCache::new()), settings)
}
