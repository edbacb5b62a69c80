//! Client for the remote linguistic-analysis service.
//!
//! `POST {base}/furigana` answers `{ "html": "..." }`, `POST {base}/analyze`
//! answers `{ "results": [Token, ...] }`. Both take `{ "text": "..." }`.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, debug_span};

use crate::error::AnnotationError;
use crate::settings::ServiceSettings;
use crate::token::{RemoteResult, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Pre-rendered markup.
    Furigana,
    /// Raw tokens for local rendering.
    Analyze,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Furigana => "/furigana",
            Self::Analyze => "/analyze",
        }
    }
}

/// Anything that can answer an annotation request. The HTTP client is the
/// production implementation; tests substitute in-memory services.
pub trait AnnotationService: Send + Sync {
    fn request(&self, endpoint: Endpoint, text: &str) -> Result<RemoteResult, AnnotationError>;
}

/// Blocking HTTP client with a hard per-request timeout.
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ServiceSettings) -> Self {
        Self::new(&settings.base_url, settings.timeout())
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl AnnotationService for HttpClient {
    fn request(&self, endpoint: Endpoint, text: &str) -> Result<RemoteResult, AnnotationError> {
        let _span = debug_span!("request", endpoint = endpoint.path()).entered();
        let url = self.url(endpoint);
        let payload = serde_json::json!({ "text": text }).to_string();

        // Timeouts, refused connections and non-2xx statuses all land here.
        // The body is read as raw bytes; decoding belongs to `parse_response`.
        let body = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(payload)
            .map_err(|e| AnnotationError::Network(format!("{url}: {e}")))?
            .into_body()
            .read_to_vec()
            .map_err(|e| AnnotationError::Network(format!("{url}: {e}")))?;
        debug!(bytes = body.len(), "response received");

        parse_response(endpoint, &body)
    }
}

#[derive(Deserialize)]
struct FuriganaResponse {
    html: String,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    results: Vec<Token>,
}

/// Decode a response body into the shape the endpoint promises. Bytes that
/// are not valid UTF-8 JSON are `Malformed`.
pub fn parse_response(
    endpoint: Endpoint,
    body: impl AsRef<[u8]>,
) -> Result<RemoteResult, AnnotationError> {
    let body = body.as_ref();
    match endpoint {
        Endpoint::Furigana => {
            let resp: FuriganaResponse = serde_json::from_slice(body)
                .map_err(|e| AnnotationError::Malformed(format!("furigana JSON: {e}")))?;
            if resp.html.is_empty() {
                return Err(AnnotationError::Malformed("empty `html`".to_string()));
            }
            Ok(RemoteResult::Html(resp.html))
        }
        Endpoint::Analyze => {
            let resp: AnalyzeResponse = serde_json::from_slice(body)
                .map_err(|e| AnnotationError::Malformed(format!("analyze JSON: {e}")))?;
            Ok(RemoteResult::Tokens(resp.results))
        }
    }
}
