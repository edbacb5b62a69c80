//! Furigana annotation pipeline: token rendering, the shared annotation cache,
//! the remote analysis client and the batch orchestrator.

pub mod batch;
pub mod cache;
pub mod client;
pub mod error;
pub mod highlight;
pub mod markup;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod speech;
pub mod token;
pub mod unicode;

pub use cache::{AnnotationCache, CacheKey};
pub use client::{AnnotationService, Endpoint, HttpClient};
pub use error::AnnotationError;
pub use highlight::HighlightSet;
pub use pipeline::{Annotation, AnnotationSource, Annotator};
pub use settings::Settings;
pub use token::{RemoteResult, Token};
