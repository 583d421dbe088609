//! Coverage measurement for the deterministic rewrite.
//!
//! The ratio of matched characters to total characters is the *only*
//! signal the fallback decision consults, so identical input and
//! dictionary state always gate the same way.

use serde::Serialize;

use crate::dictionary::MatchSpan;

/// How much of the original text the dictionary pass touched
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResult {
    /// Number of dictionary spans matched
    pub matched_phrase_count: usize,
    /// Whitespace-delimited word count of the original text
    pub total_word_count: usize,
    /// Matched chars over total chars, clamped to [0, 1]
    pub coverage_ratio: f64,
}

/// Measure coverage of `spans` over `original`.
///
/// The ratio is char-length based rather than word based, so short filler
/// matches cannot inflate it.
pub fn measure_coverage(original: &str, spans: &[MatchSpan], total_words: usize) -> CoverageResult {
    let total_chars = original.chars().count();
    let matched_chars: usize = spans
        .iter()
        .map(|s| original[s.start..s.end].chars().count())
        .sum();

    let coverage_ratio = if total_chars == 0 {
        0.0
    } else {
        (matched_chars as f64 / total_chars as f64).clamp(0.0, 1.0)
    };

    CoverageResult {
        matched_phrase_count: spans.len(),
        total_word_count: total_words,
        coverage_ratio,
    }
}
