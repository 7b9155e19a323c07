//! Utility functions for string processing.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Fold a string into the text the matcher compares.
///
/// Lowercases unless `case_sensitive`, and strips diacritics when
/// `ignore_diacritics` is set. Whitespace is kept as-is: match offsets and
/// location scoring are computed against this exact text.
pub fn fold(value: &str, case_sensitive: bool, ignore_diacritics: bool) -> String {
    let stripped;
    let value = if ignore_diacritics {
        stripped = strip_diacritics(value);
        stripped.as_str()
    } else {
        value
    };

    if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

/// Strip diacritics so accented and ASCII spellings compare equal.
///
/// - "café" → "cafe"
/// - "tummalachērla" → "tummalacherla"
/// - "naïve" → "naive"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
///
/// # Algorithm (without unicode-normalization, e.g. WASM)
///
/// Drops standalone combining marks only. Precomposed characters such as
/// "é" pass through unchanged, so input should be ASCII or already
/// decomposed.
#[cfg(feature = "unicode-normalization")]
pub fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn strip_diacritics(value: &str) -> String {
    value.chars().filter(|c| !is_combining_mark(*c)).collect()
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Number of space-separated tokens in a field value (at least 1).
///
/// Only the ASCII space splits tokens, matching how field norms are
/// computed for the generator's plain-text fields.
pub fn token_count(value: &str) -> usize {
    value.split(' ').filter(|t| !t.is_empty()).count().max(1)
}

/// A value that contributes nothing to matching.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
