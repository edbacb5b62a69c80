use crate::settings::Messages;

/// Failures at the annotation pipeline boundary. None of these escape to the
/// host: each maps to a visible fallback and none is ever cached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationError {
    /// Unreachable service, non-2xx status or exceeded timeout.
    #[error("service unreachable: {0}")]
    Network(String),
    /// The service answered, but not in the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no input text")]
    NoInput,
}

impl AnnotationError {
    pub fn fallback_html<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            Self::Network(_) => &messages.unreachable,
            Self::Malformed(_) => &messages.parse_error,
            Self::NoInput => &messages.no_input,
        }
    }
}
