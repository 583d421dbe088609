//! Phrase dictionary: ordered rewrite rules and the match scan.
//!
//! A dictionary is an immutable, priority-ordered set of rewrite rules.
//! Longer patterns always outrank shorter ones so that at any given offset
//! the most specific phrase wins ("is not" is tried before "not"), with
//! declaration order breaking ties.
//!
//! # Design Decisions
//!
//! - **Byte offsets**: spans are byte indices into the scanned text, always
//!   on char boundaries
//! - **Single greedy pass**: the scan never re-examines text a match
//!   consumed, so replacement chains cannot cascade within one pass
//! - **Build-time rejection only**: malformed rules are dropped with a
//!   warning when the dictionary is built; scanning cannot fail

pub mod data;

use std::path::Path;

use anyhow::{Context, Result};
use regex::RegexBuilder;
use serde::Deserialize;
use tracing::warn;

/// A rule as written in a dictionary file, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    /// Text or regex to match
    pub pattern: String,

    /// Replacement text
    pub replacement: String,

    /// Match case-sensitively (default: insensitive)
    #[serde(default)]
    pub case_sensitive: bool,

    /// Treat `pattern` as a regular expression instead of a literal phrase
    #[serde(default)]
    pub regex: bool,
}

impl RawRule {
    /// Convenience constructor for literal, case-insensitive rules
    pub fn literal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            case_sensitive: false,
            regex: false,
        }
    }
}

/// Dictionary file schema (YAML)
#[derive(Debug, Deserialize)]
struct RuleFile {
    rules: Vec<RawRule>,
}

/// How a rule's pattern is matched against text
#[derive(Debug)]
enum Matcher {
    /// Exact phrase, compared char-by-char with word-boundary checks
    Literal,
    /// Compiled regular expression
    Regex(regex::Regex),
}

/// A validated rule inside a built dictionary
#[derive(Debug)]
pub struct RewriteRule {
    /// Index into the dictionary's sorted rule list
    pub id: usize,
    /// Pattern as declared
    pub pattern: String,
    /// Replacement text
    pub replacement: String,
    /// Whether matching respects case
    pub case_sensitive: bool,
    matcher: Matcher,
}

impl RewriteRule {
    /// Check whether this rule matches `text` starting exactly at byte
    /// offset `at`. Returns the exclusive end offset of the match.
    fn match_at(&self, text: &str, at: usize) -> Option<usize> {
        match &self.matcher {
            Matcher::Literal => {
                let end = literal_match_end(text, at, &self.pattern, self.case_sensitive)?;
                if !boundary_ok(text, at, end, &self.pattern) {
                    return None;
                }
                Some(end)
            }
            Matcher::Regex(re) => {
                let m = re.find_at(text, at)?;
                // find_at searches forward; only a match anchored here counts.
                // Empty matches are rejected so the scan always advances.
                if m.start() == at && m.end() > at {
                    Some(m.end())
                } else {
                    None
                }
            }
        }
    }
}

/// A half-open byte range matched by one rule during a single scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Id of the rule that matched
    pub rule_id: usize,
}

impl MatchSpan {
    /// Length of the matched text in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An immutable, priority-ordered rewrite dictionary
#[derive(Debug)]
pub struct PhraseDictionary {
    rules: Vec<RewriteRule>,
    dropped: usize,
}

impl PhraseDictionary {
    /// Build a dictionary from raw rules.
    ///
    /// Rules with empty patterns or invalid regexes are dropped with a
    /// warning; construction itself never fails. Surviving rules are
    /// sorted by descending pattern length (chars), declaration order
    /// breaking ties, and assigned ids in that final order.
    pub fn build(raw_rules: Vec<RawRule>) -> Self {
        let mut rules = Vec::with_capacity(raw_rules.len());
        let mut dropped = 0;

        for raw in raw_rules {
            if raw.pattern.is_empty() {
                warn!("Dropping rule with empty pattern (replacement: {:?})", raw.replacement);
                dropped += 1;
                continue;
            }

            let matcher = if raw.regex {
                match RegexBuilder::new(&raw.pattern)
                    .case_insensitive(!raw.case_sensitive)
                    .build()
                {
                    Ok(re) => Matcher::Regex(re),
                    Err(e) => {
                        warn!(pattern = %raw.pattern, error = %e, "Dropping invalid regex rule");
                        dropped += 1;
                        continue;
                    }
                }
            } else {
                Matcher::Literal
            };

            rules.push(RewriteRule {
                id: 0, // assigned after sorting
                pattern: raw.pattern,
                replacement: raw.replacement,
                case_sensitive: raw.case_sensitive,
                matcher,
            });
        }

        // Stable sort keeps declaration order for equal lengths.
        rules.sort_by_key(|r| std::cmp::Reverse(r.pattern.chars().count()));
        for (id, rule) in rules.iter_mut().enumerate() {
            rule.id = id;
        }

        Self { rules, dropped }
    }

    /// Load a dictionary from a YAML rule file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file: {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse a dictionary from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: RuleFile =
            serde_yaml::from_str(content).context("Failed to parse dictionary YAML")?;
        Ok(Self::build(file.rules))
    }

    /// Dictionary with the built-in phrase rules
    pub fn builtin() -> Self {
        Self::from_pairs(data::BUILTIN_RULES)
    }

    /// Dictionary holding the fixed contraction table
    pub fn contractions() -> Self {
        Self::from_pairs(data::CONTRACTIONS)
    }

    /// Build from literal (pattern, replacement) pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::build(
            pairs
                .iter()
                .map(|(p, r)| RawRule::literal(*p, *r))
                .collect(),
        )
    }

    /// Number of rules that survived construction
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules dropped during construction
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Look up a rule by id
    pub fn rule(&self, id: usize) -> &RewriteRule {
        &self.rules[id]
    }

    /// Iterate rules in priority order
    pub fn rules(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    /// Single left-to-right greedy scan.
    ///
    /// At each unconsumed offset, rules are tried in priority order and the
    /// first match is taken; the cursor then jumps past the match, so spans
    /// never overlap and no rule re-examines consumed text within the pass.
    pub fn find_all_matches(&self, text: &str) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let mut cursor = 0;

        while cursor < text.len() {
            let mut taken = None;

            for rule in &self.rules {
                if let Some(end) = rule.match_at(text, cursor) {
                    taken = Some(MatchSpan {
                        start: cursor,
                        end,
                        rule_id: rule.id,
                    });
                    break;
                }
            }

            match taken {
                Some(span) => {
                    cursor = span.end;
                    spans.push(span);
                }
                None => {
                    // Advance one full char.
                    cursor += text[cursor..]
                        .chars()
                        .next()
                        .map(char::len_utf8)
                        .unwrap_or(1);
                }
            }
        }

        spans
    }
}

/// Compare `pattern` against `text[at..]` char-by-char.
///
/// Returns the byte offset just past the matched region, or None. Case
/// folding uses full Unicode lowercasing on both sides.
fn literal_match_end(text: &str, at: usize, pattern: &str, case_sensitive: bool) -> Option<usize> {
    if !text.is_char_boundary(at) {
        return None;
    }

    let mut end = at;
    let mut text_chars = text[at..].chars();

    for pc in pattern.chars() {
        let tc = text_chars.next()?;
        let matched = if case_sensitive {
            tc == pc
        } else {
            tc.to_lowercase().eq(pc.to_lowercase())
        };
        if !matched {
            return None;
        }
        end += tc.len_utf8();
    }

    Some(end)
}

/// Word-boundary check for literal matches: a pattern that starts or ends
/// with an alphanumeric char must not sit inside a longer word ("not" never
/// matches inside "nothing").
fn boundary_ok(text: &str, start: usize, end: usize, pattern: &str) -> bool {
    let starts_word = pattern.chars().next().is_some_and(char::is_alphanumeric);
    let ends_word = pattern.chars().last().is_some_and(char::is_alphanumeric);

    if starts_word {
        if let Some(prev) = text[..start].chars().next_back() {
            if prev.is_alphanumeric() {
                return false;
            }
        }
    }

    if ends_word {
        if let Some(next) = text[end..].chars().next() {
            if next.is_alphanumeric() {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, &str)]) -> PhraseDictionary {
        PhraseDictionary::from_pairs(pairs)
    }

    #[test]
    fn test_longer_pattern_wins() {
        let d = dict(&[("not", "nope"), ("is not", "isn't")]);
        let text = "it is not fine";
        let spans = d.find_all_matches(text);

        assert_eq!(spans.len(), 1);
        let span = spans[0];
        assert_eq!(&text[span.start..span.end], "is not");
        assert_eq!(d.rule(span.rule_id).replacement, "isn't");
    }

    #[test]
    fn test_spans_never_overlap() {
        let d = dict(&[("aa bb", "x"), ("bb cc", "y")]);
        let spans = d.find_all_matches("aa bb cc");

        // "aa bb" consumes through offset 5; "bb cc" can no longer match.
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 5));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let d = dict(&[("delve into", "dig into")]);
        let spans = d.find_all_matches("Let us Delve Into the details");

        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (7, 17));
    }

    #[test]
    fn test_word_boundaries_on_literals() {
        let d = dict(&[("not", "nope")]);
        assert!(d.find_all_matches("nothing notable").is_empty());
        assert_eq!(d.find_all_matches("it is not fine").len(), 1);
    }

    #[test]
    fn test_empty_pattern_dropped() {
        let d = PhraseDictionary::build(vec![
            RawRule::literal("", "x"),
            RawRule::literal("ok", "fine"),
        ]);
        assert_eq!(d.len(), 1);
        assert_eq!(d.dropped(), 1);
    }

    #[test]
    fn test_invalid_regex_dropped() {
        let d = PhraseDictionary::build(vec![
            RawRule {
                pattern: "(unclosed".to_string(),
                replacement: "x".to_string(),
                case_sensitive: false,
                regex: true,
            },
            RawRule::literal("fine", "ok"),
        ]);
        assert_eq!(d.len(), 1);
        assert_eq!(d.dropped(), 1);
    }

    #[test]
    fn test_regex_rule_matching() {
        let d = PhraseDictionary::build(vec![RawRule {
            pattern: r"\bvery\s+unique\b".to_string(),
            replacement: "unique".to_string(),
            case_sensitive: false,
            regex: true,
        }]);

        let text = "a Very  unique idea";
        let spans = d.find_all_matches(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Very  unique");
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let d = dict(&[("abc", "first"), ("xyz", "second")]);
        let spans = d.find_all_matches("abc xyz");
        assert_eq!(spans.len(), 2);
        assert_eq!(d.rule(spans[0].rule_id).replacement, "first");
        assert_eq!(d.rule(spans[1].rule_id).replacement, "second");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
rules:
  - pattern: "a tapestry of"
    replacement: "a mix of"
  - pattern: "delve"
    replacement: "dig"
    case_sensitive: false
"#;
        let d = PhraseDictionary::from_yaml(yaml).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.dropped(), 0);
    }

    #[test]
    fn test_multibyte_text_scan() {
        let d = dict(&[("naïve", "simple")]);
        let text = "a naïve plan";
        let spans = d.find_all_matches(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "naïve");
    }
}
