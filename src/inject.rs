//! Interjection insertion.
//!
//! Inserts short discourse markers at sentence heads with a probability
//! derived from the requested intensity. Insertion is strictly additive:
//! sentence boundaries, ordering, and the sentences themselves are never
//! altered. The random source is injected so tests can run seeded.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::IntensityProfile;
use crate::dictionary::data;

/// How aggressively interjections are inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Balanced,
    Heavy,
}

impl FromStr for Intensity {
    type Err = std::convert::Infallible;

    /// Unrecognized values fall back to `Balanced`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "light" => Intensity::Light,
            "heavy" => Intensity::Heavy,
            "balanced" => Intensity::Balanced,
            other => {
                warn!(value = %other, "Unknown intensity, using balanced");
                Intensity::Balanced
            }
        })
    }
}

/// One catalog entry: the marker text plus its usage weight
#[derive(Debug, Clone, Deserialize)]
pub struct Interjection {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Catalog file schema (YAML)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    interjections: Vec<Interjection>,
}

/// Fixed, process-wide catalog of interjections
#[derive(Debug)]
pub struct InterjectionCatalog {
    entries: Vec<Interjection>,
}

impl InterjectionCatalog {
    /// Catalog with the built-in markers
    pub fn builtin() -> Self {
        Self {
            entries: data::INTERJECTIONS
                .iter()
                .map(|(text, weight)| Interjection {
                    text: (*text).to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Load a catalog from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read interjection file: {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(content).context("Failed to parse interjection YAML")?;
        // Zero-weight entries can never be drawn; drop them up front.
        let entries = file
            .interjections
            .into_iter()
            .filter(|i| {
                if i.weight == 0 || i.text.is_empty() {
                    warn!(text = %i.text, "Dropping unusable interjection entry");
                    false
                } else {
                    true
                }
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weighted draw excluding `exclude` (the entry used on the previous
    /// sentence). Returns None when no candidate remains.
    fn pick<R: Rng>(&self, rng: &mut R, exclude: Option<usize>) -> Option<usize> {
        let total: u64 = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude)
            .map(|(_, e)| e.weight as u64)
            .sum();
        if total == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total);
        for (i, entry) in self.entries.iter().enumerate() {
            if Some(i) == exclude {
                continue;
            }
            let w = entry.weight as u64;
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        None
    }
}

/// Inserts discourse markers at sentence heads
pub struct InterjectionInjector {
    catalog: InterjectionCatalog,
    profile: IntensityProfile,
}

impl InterjectionInjector {
    pub fn new(catalog: InterjectionCatalog, profile: IntensityProfile) -> Self {
        Self { catalog, profile }
    }

    pub fn catalog(&self) -> &InterjectionCatalog {
        &self.catalog
    }

    /// Insert interjections into `text`.
    ///
    /// Each sentence head independently receives a marker with the
    /// intensity's probability; the marker chosen for the immediately
    /// preceding sentence is never repeated.
    pub fn inject<R: Rng>(&self, text: &str, intensity: Intensity, rng: &mut R) -> String {
        if self.catalog.is_empty() {
            return text.to_string();
        }

        let probability = self.profile.probability(intensity);
        let heads = sentence_heads(text);

        let mut out = String::with_capacity(text.len() + heads.len() * 12);
        let mut copied = 0;
        let mut previous: Option<usize> = None;

        for &head in &heads {
            out.push_str(&text[copied..head]);
            copied = head;

            if rng.gen::<f64>() < probability {
                match self.catalog.pick(rng, previous) {
                    Some(idx) => {
                        out.push_str(&self.catalog.entries[idx].text);
                        previous = Some(idx);
                    }
                    None => previous = None,
                }
            } else {
                previous = None;
            }
        }

        out.push_str(&text[copied..]);
        out
    }
}

/// Byte offsets where sentences begin: the first non-whitespace char, and
/// the first non-whitespace char after terminal punctuation + whitespace.
fn sentence_heads(text: &str) -> Vec<usize> {
    let mut heads = Vec::new();
    let mut expect_head = true;
    let mut after_terminal = false;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if after_terminal {
                expect_head = true;
                after_terminal = false;
            }
            continue;
        }

        if expect_head {
            heads.push(i);
            expect_head = false;
        }
        after_terminal = matches!(c, '.' | '!' | '?');
    }

    heads
}
