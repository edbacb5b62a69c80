//! Character-level Unicode classification for Japanese text.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー (U+30FC).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// CJK Unified Ideographs plus Extension A.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FAF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

/// CJK symbols and punctuation (U+3000..U+303F): 、。「」 and the ideographic space.
pub fn is_cjk_punctuation(c: char) -> bool {
    ('\u{3000}'..='\u{303F}').contains(&c)
}

/// Fullwidth ASCII variants and halfwidth katakana (U+FF00..U+FF9F).
pub fn is_fullwidth_form(c: char) -> bool {
    ('\u{FF00}'..='\u{FF9F}').contains(&c)
}

/// Script-range membership test used to decide whether a selection is worth
/// offering annotation for.
pub fn is_japanese_char(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_kanji(c) || is_cjk_punctuation(c) || is_fullwidth_form(c)
}

/// True when at least one character of `s` falls in a Japanese script range.
pub fn contains_japanese(s: &str) -> bool {
    s.chars().any(is_japanese_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ー'));
        assert!(!is_katakana('あ'));
        assert!(is_kanji('漢'));
        assert!(is_kanji('㐀'));
        assert!(!is_kanji('あ'));
        assert!(is_cjk_punctuation('。'));
        assert!(is_fullwidth_form('Ａ'));
        assert!(is_fullwidth_form('ｱ'));
    }

    #[test]
    fn test_contains_japanese() {
        assert!(contains_japanese("食べる"));
        assert!(contains_japanese("hello 世界"));
        assert!(contains_japanese("カタカナ"));
        assert!(contains_japanese("「quote」"));
        assert!(!contains_japanese("hello world"));
        assert!(!contains_japanese("123 !?"));
        assert!(!contains_japanese(""));
        assert!(!contains_japanese("Привет"));
    }
}
