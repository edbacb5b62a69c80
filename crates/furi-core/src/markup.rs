//! Minimal markup scanner for element content.
//!
//! Only what the batch run needs: the visible text of a fragment and the text
//! of spans previously emphasized with the highlight style. Ruby readings
//! (`<rt>`, `<rp>`) are not part of the text, so annotating an already
//! annotated fragment sends the same source text again.

use crate::highlight::HighlightSet;

enum Piece<'a> {
    Tag(&'a str),
    Text(&'a str),
}

fn pieces(markup: &str) -> impl Iterator<Item = Piece<'_>> {
    let mut rest = markup;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                let (tag, tail) = rest.split_at(end + 1);
                rest = tail;
                return Some(Piece::Tag(tag));
            }
            // Unterminated tag: the remainder is literal text.
            let text = rest;
            rest = "";
            return Some(Piece::Text(text));
        }
        let end = rest.find('<').unwrap_or(rest.len());
        let (text, tail) = rest.split_at(end);
        rest = tail;
        Some(Piece::Text(text))
    })
}

/// `(lowercased name, is_closing)` of a `<...>` tag.
fn tag_name(tag: &str) -> (String, bool) {
    let inner = tag.trim_start_matches('<').trim_end_matches('>').trim();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, inner),
    };
    let name = inner
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    (name, closing)
}

fn is_reading_tag(name: &str) -> bool {
    name == "rt" || name == "rp"
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether an opening tag carries `style` (whitespace and case insensitive,
/// trailing `;` optional).
fn has_style(tag: &str, style: &str) -> bool {
    let needle = normalize(style.trim().trim_end_matches(';'));
    !needle.is_empty() && normalize(tag).contains(&needle)
}

/// Visible text of a fragment: tags stripped, ruby readings skipped, entities decoded.
pub fn text_content(markup: &str) -> String {
    let mut out = String::new();
    let mut reading_depth = 0usize;
    for piece in pieces(markup) {
        match piece {
            Piece::Tag(tag) => {
                let (name, closing) = tag_name(tag);
                if is_reading_tag(&name) {
                    if closing {
                        reading_depth = reading_depth.saturating_sub(1);
                    } else {
                        reading_depth += 1;
                    }
                }
            }
            Piece::Text(text) if reading_depth == 0 => out.push_str(&decode_entities(text)),
            Piece::Text(_) => {}
        }
    }
    out
}

/// Trimmed text of every `<span>` whose opening tag carries `style`, in
/// document order. Nested marked spans each contribute their own text.
pub fn emphasized_fragments(markup: &str, style: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    // One entry per open span: Some(buffer) when it is a marked span.
    let mut open_spans: Vec<Option<String>> = Vec::new();
    let mut reading_depth = 0usize;

    for piece in pieces(markup) {
        match piece {
            Piece::Tag(tag) => {
                let (name, closing) = tag_name(tag);
                if is_reading_tag(&name) {
                    if closing {
                        reading_depth = reading_depth.saturating_sub(1);
                    } else {
                        reading_depth += 1;
                    }
                } else if name == "span" {
                    if closing {
                        if let Some(Some(text)) = open_spans.pop() {
                            let text = text.trim();
                            if !text.is_empty() {
                                fragments.push(text.to_string());
                            }
                        }
                    } else if !tag.ends_with("/>") {
                        open_spans.push(has_style(tag, style).then(String::new));
                    }
                }
            }
            Piece::Text(text) if reading_depth == 0 => {
                let decoded = decode_entities(text);
                for buffer in open_spans.iter_mut().flatten() {
                    buffer.push_str(&decoded);
                }
            }
            Piece::Text(_) => {}
        }
    }
    fragments
}

/// Highlight set of a fragment, deduplicated.
pub fn extract_highlights(markup: &str, style: &str) -> HighlightSet {
    emphasized_fragments(markup, style).into_iter().collect()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: &str = "color:#ff264e;";

    #[test]
    fn text_content_strips_tags() {
        assert_eq!(text_content("猫が<b>好き</b>です"), "猫が好きです");
        assert_eq!(text_content("plain"), "plain");
        assert_eq!(text_content(""), "");
    }

    #[test]
    fn text_content_skips_readings() {
        let html = "<ruby>食<rp>(</rp><rt>た</rt><rp>)</rp></ruby>べる";
        assert_eq!(text_content(html), "食べる");
    }

    #[test]
    fn text_content_decodes_entities() {
        assert_eq!(text_content("a &amp; b &lt;c&gt; &#x732B;&#29483;"), "a & b <c> 猫猫");
        assert_eq!(text_content("AT&T &bogus; &"), "AT&T &bogus; &");
    }

    #[test]
    fn unterminated_tag_is_text() {
        assert_eq!(text_content("猫 <b"), "猫 <b");
    }

    #[test]
    fn emphasized_spans_extracted() {
        let html = r#"<span style="color:#ff264e;"> 猫 </span>が<span class="x">好き</span><SPAN STYLE="Color: #FF264E">好き</SPAN>"#;
        assert_eq!(emphasized_fragments(html, STYLE), vec!["猫", "好き"]);
    }

    #[test]
    fn emphasized_span_with_ruby_keeps_base_text() {
        let html = r#"<span style="color:#ff264e;"><ruby>食<rt>た</rt></ruby>べ</span>る"#;
        assert_eq!(emphasized_fragments(html, STYLE), vec!["食べ"]);
    }

    #[test]
    fn nested_spans() {
        let html = r#"<span style="color:#ff264e;">外<span>中</span><span style="color:#ff264e;">内</span></span>"#;
        assert_eq!(emphasized_fragments(html, STYLE), vec!["内", "外中内"]);
    }

    #[test]
    fn extract_highlights_dedups() {
        let html = r#"<span style="color:#ff264e;">猫</span>と<span style="color:#ff264e;">猫</span>"#;
        let set = extract_highlights(html, STYLE);
        assert_eq!(set.len(), 1);
        assert!(set.contains("猫"));
    }

    #[test]
    fn tag_names() {
        assert_eq!(tag_name("<SPAN style=\"x\">"), ("span".to_string(), false));
        assert_eq!(tag_name("</ rt >"), ("rt".to_string(), true));
        assert_eq!(tag_name("<br/>"), ("br".to_string(), false));
    }
}
