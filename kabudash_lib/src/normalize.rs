//! String normalization shared by every comparison in the pipeline.

use unicode_normalization::UnicodeNormalization;

/// Exchange suffix carried by Tokyo Stock Exchange codes (e.g. `5108.T`).
pub const EXCHANGE_SUFFIX: &str = ".T";

/// NFKC-normalizes and trims surrounding whitespace.
///
/// Full-width ASCII folds to half-width and half-width katakana folds to
/// full-width, so `"Ａ"` and `"A"` compare equal afterwards. Idempotent.
pub fn normalize(s: &str) -> String {
    s.nfkc().collect::<String>().trim().to_string()
}

/// Normalizes and lower-cases, for case-insensitive substring matching.
pub fn fold(s: &str) -> String {
    normalize(s).to_lowercase()
}

/// True if `s` contains at least one hiragana, katakana, CJK ideograph or
/// half-width katakana character, or the `ー` / `・` marks.
pub fn has_japanese_script(s: &str) -> bool {
    s.chars().any(is_japanese_char)
}

fn is_japanese_char(ch: char) -> bool {
    matches!(ch,
        '\u{3041}'..='\u{3093}'   // hiragana
        | '\u{30A1}'..='\u{30F3}' // katakana
        | '\u{4E00}'..='\u{9FA5}' // CJK unified ideographs
        | '\u{FF66}'..='\u{FF9F}' // half-width katakana
        | 'ー'
        | '・'
    )
}

/// Removes a trailing exchange suffix: `"5108.T"` becomes `"5108"`,
/// `"AAPL"` is returned unchanged.
pub fn strip_exchange_suffix(code: &str) -> &str {
    code.strip_suffix(EXCHANGE_SUFFIX).unwrap_or(code)
}
