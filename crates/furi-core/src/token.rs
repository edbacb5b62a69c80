use serde::{Deserialize, Serialize};

use crate::highlight::HighlightSet;
use crate::render::render_with_style;

/// A segmented unit of analysed text.
///
/// When both `kanji_base` and `furigana` are non-empty the token renders as a
/// ruby unit followed by `okurigana`; otherwise `surface` is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furigana: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okurigana: Option<String>,
}

impl Token {
    pub fn plain(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            kanji_base: None,
            furigana: None,
            okurigana: None,
        }
    }

    pub fn annotated(
        surface: impl Into<String>,
        kanji_base: impl Into<String>,
        furigana: impl Into<String>,
        okurigana: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            kanji_base: Some(kanji_base.into()),
            furigana: Some(furigana.into()),
            okurigana: Some(okurigana.into()),
        }
    }

    /// `(base, reading)` when the token carries a usable reading.
    pub fn ruby(&self) -> Option<(&str, &str)> {
        let base = self.kanji_base.as_deref().filter(|s| !s.is_empty())?;
        let reading = self.furigana.as_deref().filter(|s| !s.is_empty())?;
        Some((base, reading))
    }
}

/// Successful response of the analysis service. The two endpoints answer with
/// different shapes; `into_html` is the single place that reconciles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResult {
    /// Pre-rendered markup from `/furigana`.
    Html(String),
    /// Raw tokens from `/analyze`, rendered locally.
    Tokens(Vec<Token>),
}

impl RemoteResult {
    /// Pre-rendered markup is used as-is; highlights only apply to tokens.
    pub fn into_html(self, highlights: &HighlightSet, highlight_style: &str) -> String {
        match self {
            Self::Html(html) => html,
            Self::Tokens(tokens) => render_with_style(&tokens, highlights, highlight_style),
        }
    }
}
