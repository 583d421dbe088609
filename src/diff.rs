//! Token-level diff between original and final text.
//!
//! Tokens are runs of word chars, runs of whitespace, and single
//! punctuation chars; they partition their source exactly, which is what
//! makes the double round-trip invariant hold: concatenating every
//! segment's original side reproduces the original input, and every
//! segment's final side reproduces the final output, char for char.
//!
//! Alignment is a longest-common-subsequence over tokens. Runs of matched
//! tokens become `Equal` segments; adjacent unmatched runs are merged,
//! becoming `Replaced` when both sides are non-empty and
//! `Deleted`/`Inserted` otherwise.

use serde::Serialize;

/// Upper bound on the LCS table size. Beyond it the diff degrades to a
/// whole-text Deleted + Inserted pair, keeping runtime and memory bounded.
const MAX_LCS_CELLS: usize = 4_000_000;

/// Kind of one aligned diff unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Equal,
    Replaced,
    Inserted,
    Deleted,
}

/// One aligned unit of the original-vs-final comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub original_text: String,
    pub final_text: String,
}

impl DiffSegment {
    fn equal(text: String) -> Self {
        Self {
            kind: SegmentKind::Equal,
            original_text: text.clone(),
            final_text: text,
        }
    }

    fn unmatched(original_text: String, final_text: String) -> Self {
        let kind = match (original_text.is_empty(), final_text.is_empty()) {
            (false, false) => SegmentKind::Replaced,
            (false, true) => SegmentKind::Deleted,
            (true, false) => SegmentKind::Inserted,
            (true, true) => unreachable!("empty unmatched run"),
        };
        Self {
            kind,
            original_text,
            final_text,
        }
    }
}

/// Compute the aligned segment list between `original` and `final_text`
pub fn compute_diff(original: &str, final_text: &str) -> Vec<DiffSegment> {
    if original.is_empty() && final_text.is_empty() {
        return Vec::new();
    }
    if original.is_empty() {
        return vec![DiffSegment::unmatched(String::new(), final_text.to_string())];
    }
    if final_text.is_empty() {
        return vec![DiffSegment::unmatched(original.to_string(), String::new())];
    }
    if original == final_text {
        return vec![DiffSegment::equal(original.to_string())];
    }

    let a = tokenize(original);
    let b = tokenize(final_text);

    if a.len().saturating_mul(b.len()) > MAX_LCS_CELLS {
        return degenerate(original, final_text);
    }

    let dp = lcs_table(&a, &b);
    if dp[0] == 0 {
        // No token in common at all.
        return degenerate(original, final_text);
    }

    merge_ops(&a, &b, &dp)
}

/// Whole-original Deleted plus whole-final Inserted
fn degenerate(original: &str, final_text: &str) -> Vec<DiffSegment> {
    vec![
        DiffSegment::unmatched(original.to_string(), String::new()),
        DiffSegment::unmatched(String::new(), final_text.to_string()),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Word,
    Space,
    Punct,
}

fn classify(c: char) -> TokenClass {
    if c.is_alphanumeric() || c == '\'' {
        TokenClass::Word
    } else if c.is_whitespace() {
        TokenClass::Space
    } else {
        TokenClass::Punct
    }
}

/// Tokenizer state: what the current token is accumulating
#[derive(Debug, Clone, Copy)]
enum TokenState {
    /// Leading whitespace before any head char
    Lead,
    /// Inside a word-char run
    Word,
    /// Head is complete; only trailing whitespace may still attach
    Tail,
}

/// Split text into tokens at word and punctuation boundaries.
///
/// A token is a word run or a single punctuation char, plus any trailing
/// whitespace; leading whitespace forms its own token. Whitespace rides
/// along with its head instead of being a token of its own, so a replaced
/// phrase stays one contiguous run rather than being split apart by its
/// interior spaces matching. The tokens concatenate back to the input
/// exactly.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut state: Option<TokenState> = None;

    for (i, c) in text.char_indices() {
        let class = classify(c);
        let Some(current) = state else {
            state = Some(match class {
                TokenClass::Space => TokenState::Lead,
                TokenClass::Word => TokenState::Word,
                TokenClass::Punct => TokenState::Tail,
            });
            continue;
        };

        let next = match (current, class) {
            (TokenState::Lead, TokenClass::Space) => None,
            (TokenState::Word, TokenClass::Word) => None,
            (TokenState::Word, TokenClass::Space) => {
                state = Some(TokenState::Tail);
                None
            }
            (TokenState::Tail, TokenClass::Space) => None,
            (_, TokenClass::Word) => Some(TokenState::Word),
            (_, TokenClass::Punct) => Some(TokenState::Tail),
        };

        if let Some(next_state) = next {
            tokens.push(&text[start..i]);
            start = i;
            state = Some(next_state);
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

/// Suffix LCS table: dp[i * (m + 1) + j] = LCS length of a[i..] vs b[j..]
fn lcs_table(a: &[&str], b: &[&str]) -> Vec<u32> {
    let n = a.len();
    let m = b.len();
    let width = m + 1;
    let mut dp = vec![0u32; (n + 1) * width];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i * width + j] = if a[i] == b[j] {
                dp[(i + 1) * width + j + 1] + 1
            } else {
                dp[(i + 1) * width + j].max(dp[i * width + j + 1])
            };
        }
    }

    dp
}

/// Walk the table, grouping the token ops into merged segments.
///
/// On ties the walk prefers consuming original tokens first, so adjacent
/// churn collapses into a single Replaced segment instead of alternating
/// Deleted/Inserted pairs.
fn merge_ops(a: &[&str], b: &[&str], dp: &[u32]) -> Vec<DiffSegment> {
    let n = a.len();
    let m = b.len();
    let width = m + 1;

    let mut segments: Vec<DiffSegment> = Vec::new();
    let mut equal_run = String::new();
    let mut deleted_run = String::new();
    let mut inserted_run = String::new();

    let flush_unmatched =
        |segments: &mut Vec<DiffSegment>, deleted: &mut String, inserted: &mut String| {
            if !deleted.is_empty() || !inserted.is_empty() {
                segments.push(DiffSegment::unmatched(
                    std::mem::take(deleted),
                    std::mem::take(inserted),
                ));
            }
        };
    let flush_equal = |segments: &mut Vec<DiffSegment>, equal: &mut String| {
        if !equal.is_empty() {
            segments.push(DiffSegment::equal(std::mem::take(equal)));
        }
    };

    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if a[i] == b[j] {
            flush_unmatched(&mut segments, &mut deleted_run, &mut inserted_run);
            equal_run.push_str(a[i]);
            i += 1;
            j += 1;
        } else if dp[(i + 1) * width + j] >= dp[i * width + j + 1] {
            flush_equal(&mut segments, &mut equal_run);
            deleted_run.push_str(a[i]);
            i += 1;
        } else {
            flush_equal(&mut segments, &mut equal_run);
            inserted_run.push_str(b[j]);
            j += 1;
        }
    }
    if i < n || j < m {
        flush_equal(&mut segments, &mut equal_run);
        while i < n {
            deleted_run.push_str(a[i]);
            i += 1;
        }
        while j < m {
            inserted_run.push_str(b[j]);
            j += 1;
        }
    }

    flush_unmatched(&mut segments, &mut deleted_run, &mut inserted_run);
    flush_equal(&mut segments, &mut equal_run);

    segments
}

/// Concatenations of both segment sides, for invariant checks
pub fn reassemble(segments: &[DiffSegment]) -> (String, String) {
    let mut original = String::new();
    let mut final_text = String::new();
    for segment in segments {
        original.push_str(&segment.original_text);
        final_text.push_str(&segment.final_text);
    }
    (original, final_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(original: &str, final_text: &str) -> Vec<DiffSegment> {
        let segments = compute_diff(original, final_text);
        let (o, f) = reassemble(&segments);
        assert_eq!(o, original, "original side must reassemble");
        assert_eq!(f, final_text, "final side must reassemble");
        segments
    }

    #[test]
    fn test_tokenize_partitions_exactly() {
        let text = "Hello, world!  It's fine.";
        let tokens = tokenize(text);
        assert_eq!(tokens.concat(), text);
        assert_eq!(
            tokens,
            vec!["Hello", ", ", "world", "!  ", "It's ", "fine", "."]
        );
    }

    #[test]
    fn test_tokenize_leading_whitespace() {
        let tokens = tokenize("  lead");
        assert_eq!(tokens, vec!["  ", "lead"]);
        assert_eq!(tokens.concat(), "  lead");
    }

    #[test]
    fn test_identical_texts() {
        let segments = assert_round_trip("same text", "same text");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Equal);
    }

    #[test]
    fn test_single_replacement() {
        let segments = assert_round_trip(
            "The implementation demonstrates significant improvements.",
            "The implementation really helped a lot.",
        );

        let replaced: Vec<_> = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Replaced)
            .collect();
        assert_eq!(replaced.len(), 1);
        assert_eq!(
            replaced[0].original_text,
            "demonstrates significant improvements"
        );
        assert_eq!(replaced[0].final_text, "really helped a lot");
        assert!(segments.iter().any(|s| s.kind == SegmentKind::Equal));
    }

    #[test]
    fn test_pure_insertion() {
        let segments = assert_round_trip("one two", "one extra two");
        assert!(segments.iter().any(|s| s.kind == SegmentKind::Inserted));
        assert!(!segments.iter().any(|s| s.kind == SegmentKind::Deleted));
    }

    #[test]
    fn test_pure_deletion() {
        let segments = assert_round_trip("one extra two", "one two");
        assert!(segments.iter().any(|s| s.kind == SegmentKind::Deleted));
        assert!(!segments.iter().any(|s| s.kind == SegmentKind::Inserted));
    }

    #[test]
    fn test_no_shared_tokens_is_degenerate() {
        let segments = assert_round_trip("alpha beta", "gamma-delta");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, SegmentKind::Deleted);
        assert_eq!(segments[1].kind, SegmentKind::Inserted);
    }

    #[test]
    fn test_empty_sides() {
        assert!(compute_diff("", "").is_empty());

        let ins = compute_diff("", "new text");
        assert_eq!(ins.len(), 1);
        assert_eq!(ins[0].kind, SegmentKind::Inserted);

        let del = compute_diff("old text", "");
        assert_eq!(del.len(), 1);
        assert_eq!(del[0].kind, SegmentKind::Deleted);
    }

    #[test]
    fn test_length_changing_rewrite_round_trips() {
        assert_round_trip(
            "It is important to note that the system plays a crucial role in results.",
            "Note that the system matters a lot for results. Honestly, that held up.",
        );
    }

    #[test]
    fn test_adjacent_churn_merges_into_one_replaced() {
        let segments = assert_round_trip("a x y b", "a p q b");
        let replaced: Vec<_> = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Replaced)
            .collect();
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].original_text, "x y ");
        assert_eq!(replaced[0].final_text, "p q ");
    }

    #[test]
    fn test_multibyte_round_trip() {
        assert_round_trip("naïve café plan", "naïve bistro plan — truly");
    }
}
