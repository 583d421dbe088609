//! Deterministic rewrite pass.
//!
//! Four steps, each pure and independently testable: dictionary phrase
//! substitution, the fixed contraction table, sentence-capitalization
//! repair, and whitespace normalization. Rewriting cannot fail on
//! well-formed input; empty input passes through unchanged.

use std::sync::Arc;

use crate::dictionary::{MatchSpan, PhraseDictionary};

/// Result of a deterministic rewrite
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    /// Fully rewritten text
    pub text: String,
    /// Dictionary match spans, offsets into the *original* input
    pub spans: Vec<MatchSpan>,
}

/// Applies the phrase dictionary and mechanical normalizations
pub struct DeterministicRewriter {
    dictionary: Arc<PhraseDictionary>,
    contractions: PhraseDictionary,
}

impl DeterministicRewriter {
    pub fn new(dictionary: Arc<PhraseDictionary>) -> Self {
        Self {
            dictionary,
            contractions: PhraseDictionary::contractions(),
        }
    }

    /// The phrase dictionary this rewriter scans with
    pub fn dictionary(&self) -> &PhraseDictionary {
        &self.dictionary
    }

    /// Rewrite `text` deterministically.
    ///
    /// The returned spans are the dictionary matches found in the input;
    /// contraction edits are mechanical and intentionally not counted.
    pub fn rewrite(&self, text: &str) -> RewriteOutcome {
        if text.is_empty() {
            return RewriteOutcome {
                text: String::new(),
                spans: Vec::new(),
            };
        }

        // Pass 1: phrase substitution on the raw input.
        let spans = self.dictionary.find_all_matches(text);
        let substituted = apply_spans(&self.dictionary, text, &spans);

        // Pass 2: contractions over the already substituted text.
        let contraction_spans = self.contractions.find_all_matches(&substituted);
        let contracted = apply_spans(&self.contractions, &substituted, &contraction_spans);

        // Pass 3 + 4: capitalization repair, then whitespace cleanup.
        let repaired = repair_capitalization(&contracted);
        let normalized = normalize_whitespace(&repaired);

        RewriteOutcome {
            text: normalized,
            spans,
        }
    }
}

/// Substitute matched spans left-to-right with an offset accumulator, so
/// earlier substitutions never invalidate later span offsets.
fn apply_spans(dictionary: &PhraseDictionary, text: &str, spans: &[MatchSpan]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for span in spans {
        out.push_str(&text[last..span.start]);
        let rule = dictionary.rule(span.rule_id);
        let matched = &text[span.start..span.end];
        push_replacement(&mut out, matched, &rule.replacement, rule.case_sensitive);
        last = span.end;
    }

    out.push_str(&text[last..]);
    out
}

/// Append the replacement, carrying over a leading capital from the
/// matched text when the rule matched case-insensitively.
fn push_replacement(out: &mut String, matched: &str, replacement: &str, case_sensitive: bool) {
    if !case_sensitive {
        let leading_upper = matched.chars().next().is_some_and(char::is_uppercase);
        let mut chars = replacement.chars();
        if leading_upper {
            if let Some(first) = chars.next() {
                if first.is_lowercase() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    return;
                }
            }
        }
    }
    out.push_str(replacement);
}

/// Capitalize the first letter of the text and the first letter after each
/// sentence-terminal punctuation mark followed by whitespace.
fn repair_capitalization(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_sentence_start = true;
    let mut after_terminal = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if after_terminal {
                at_sentence_start = true;
                after_terminal = false;
            }
            out.push(c);
            continue;
        }

        if at_sentence_start {
            at_sentence_start = false;
            if c.is_alphabetic() {
                out.extend(c.to_uppercase());
                after_terminal = false;
                continue;
            }
        }

        after_terminal = matches!(c, '.' | '!' | '?');
        out.push(c);
    }

    out
}

/// Collapse whitespace runs to single spaces, trim both ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
