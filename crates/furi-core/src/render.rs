//! Token list + highlight set → ruby markup.
//!
//! Rendering is pure and total: the same input always yields byte-identical
//! output, and no token shape is rejected.

use crate::highlight::HighlightSet;
use crate::token::Token;

/// Inline style of the emphasis wrapper.
pub const DEFAULT_HIGHLIGHT_STYLE: &str = "color:#ff264e;";

pub fn render(tokens: &[Token], highlights: &HighlightSet) -> String {
    render_with_style(tokens, highlights, DEFAULT_HIGHLIGHT_STYLE)
}

pub fn render_with_style(tokens: &[Token], highlights: &HighlightSet, highlight_style: &str) -> String {
    let mut out = String::new();
    for token in tokens {
        let emphasized = highlights.contains(&token.surface);
        if emphasized {
            out.push_str("<span style=\"");
            out.push_str(highlight_style);
            out.push_str("\">");
        }
        push_fragment(&mut out, token);
        if emphasized {
            out.push_str("</span>");
        }
    }
    out
}

fn push_fragment(out: &mut String, token: &Token) {
    match token.ruby() {
        Some((base, reading)) => {
            out.push_str("<ruby>");
            out.push_str(base);
            out.push_str("<rt>");
            out.push_str(reading);
            out.push_str("</rt></ruby>");
            out.push_str(token.okurigana.as_deref().unwrap_or(""));
        }
        None => out.push_str(&token.surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taberu() -> Vec<Token> {
        vec![Token::annotated("食べ", "食", "た", "べ"), Token::plain("る")]
    }

    #[test]
    fn annotated_then_plain() {
        assert_eq!(
            render(&taberu(), &HighlightSet::new()),
            "<ruby>食<rt>た</rt></ruby>べる"
        );
    }

    #[test]
    fn missing_okurigana_renders_empty_suffix() {
        let mut token = Token::annotated("猫", "猫", "ねこ", "");
        token.okurigana = None;
        assert_eq!(
            render(&[token], &HighlightSet::new()),
            "<ruby>猫<rt>ねこ</rt></ruby>"
        );
    }

    #[test]
    fn incomplete_token_renders_surface_exactly() {
        let mut token = Token::annotated("今日", "今日", "", "");
        assert_eq!(render(&[token.clone()], &HighlightSet::new()), "今日");
        token.kanji_base = None;
        token.furigana = Some("きょう".to_string());
        assert_eq!(render(&[token], &HighlightSet::new()), "今日");
    }

    #[test]
    fn highlighted_token_wrapped_once() {
        let highlights: HighlightSet = ["食べ", "食べ"].into_iter().collect();
        let out = render(&taberu(), &highlights);
        assert_eq!(
            out,
            "<span style=\"color:#ff264e;\"><ruby>食<rt>た</rt></ruby>べ</span>る"
        );
        assert_eq!(out.matches("<span").count(), 1);
    }

    #[test]
    fn highlight_order_does_not_matter() {
        let tokens = vec![
            Token::plain("猫"),
            Token::plain("が"),
            Token::annotated("好き", "好", "す", "き"),
        ];
        let a: HighlightSet = ["好き", "猫"].into_iter().collect();
        let b: HighlightSet = ["猫", "好き"].into_iter().collect();
        assert_eq!(render(&tokens, &a), render(&tokens, &b));
        assert_eq!(render(&tokens, &a).matches("<span").count(), 2);
    }

    #[test]
    fn rendering_is_idempotent() {
        let highlights: HighlightSet = ["る"].into_iter().collect();
        assert_eq!(render(&taberu(), &highlights), render(&taberu(), &highlights));
    }

    #[test]
    fn custom_style() {
        let highlights: HighlightSet = ["る"].into_iter().collect();
        assert_eq!(
            render_with_style(&[Token::plain("る")], &highlights, "font-weight:bold;"),
            "<span style=\"font-weight:bold;\">る</span>"
        );
    }

    #[test]
    fn empty_tokens_render_empty() {
        assert_eq!(render(&[], &HighlightSet::new()), "");
    }
}
