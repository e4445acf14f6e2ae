//! Canonical text form for name fields.

use deunicode::deunicode;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes a raw field value to its canonical matching form.
///
/// 1. NFKD-decompose and drop combining marks (é → e, ﬁ → fi)
/// 2. Transliterate what is left to ASCII (ß → ss, Æ → AE, Þ → Th)
/// 3. Lowercase
/// 4. Delete apostrophes, turn every other character outside `[a-z0-9 ]`
///    into a separator
/// 5. Collapse whitespace and trim
///
/// The result only contains `[a-z0-9]` runs joined by single spaces, so the
/// function is idempotent.
///
/// ```
/// use linkprep_transform::normalize_text;
///
/// assert_eq!(normalize_text("  José  García "), "jose garcia");
/// assert_eq!(normalize_text("O'Brien"), "obrien");
/// assert_eq!(normalize_text("Mary-Jane"), "mary jane");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let decomposed: String = raw.nfkd().filter(|ch| !is_combining_mark(*ch)).collect();
    let latin = deunicode(&decomposed);

    let mut canonical = String::with_capacity(latin.len());
    for ch in latin.chars().flat_map(char::to_lowercase) {
        if is_apostrophe(ch) {
            continue;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            canonical.push(ch);
        } else {
            canonical.push(' ');
        }
    }
    canonical.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Same as [`normalize_text`], treating an absent value as empty.
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_text).unwrap_or_default()
}

fn is_apostrophe(ch: char) -> bool {
    matches!(
        ch,
        '\'' | '\u{2019}' | '\u{2018}' | '`' | '\u{00B4}' | '\u{02BC}'
    )
}
