use unicode_normalization::UnicodeNormalization;

/// Canonical form used when comparing a submitted answer against the pool's
/// expected answer: lowercase, trimmed, NFD-decomposed with the combining
/// diacritical marks block (U+0300..=U+036F) discarded.
pub fn normalize_answer(s: &str) -> String {
    s.to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}
