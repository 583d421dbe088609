//! Pipeline orchestrator.
//!
//! Sequences the stages in a fixed order: deterministic rewrite, coverage
//! measurement, fallback decision, interjection insertion, diff. Coverage
//! is measured on the deterministic rewrite *before* interjections are
//! added, since interjections are not rule matches and would distort the
//! ratio; the diff is always computed against the original input.
//!
//! Every run is independent: the dictionary and catalog are read-only and
//! shared, nothing is mutated during a run, and arbitrarily many runs may
//! execute concurrently.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::adapters::GenerativeRewriter;
use crate::config::PipelineSettings;
use crate::coverage::{measure_coverage, CoverageResult};
use crate::dictionary::PhraseDictionary;
use crate::diff::{compute_diff, DiffSegment};
use crate::fallback::FallbackCoordinator;
use crate::inject::{Intensity, InterjectionCatalog, InterjectionInjector};
use crate::rewrite::DeterministicRewriter;

/// The one checked failure: input validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HumanizeError {
    #[error("input text is empty")]
    EmptyInput,
}

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct HumanizeOptions {
    pub intensity: Intensity,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

/// The result contract the caller owns
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub final_text: String,
    pub segments: Vec<DiffSegment>,
    pub coverage: CoverageResult,
    pub used_fallback: bool,
}

/// Main pipeline orchestrator
pub struct Humanizer {
    rewriter: DeterministicRewriter,
    injector: InterjectionInjector,
    coordinator: FallbackCoordinator,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Humanizer {
    /// Create an orchestrator from explicit parts
    pub fn new(
        dictionary: Arc<PhraseDictionary>,
        catalog: InterjectionCatalog,
        settings: &PipelineSettings,
    ) -> Self {
        Self {
            rewriter: DeterministicRewriter::new(dictionary),
            injector: InterjectionInjector::new(catalog, settings.intensity),
            coordinator: FallbackCoordinator::new(
                settings.coverage_threshold,
                settings.fallback_timeout,
            ),
        }
    }

    /// Orchestrator with the built-in dictionary, catalog, and defaults
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(PhraseDictionary::builtin()),
            InterjectionCatalog::builtin(),
            &PipelineSettings::default(),
        )
    }

    /// Orchestrator built from the resolved configuration: rule and
    /// catalog files when configured, built-ins otherwise.
    pub fn from_config() -> anyhow::Result<Self> {
        let cfg = crate::config::config()?;

        let dictionary = match &cfg.dictionary {
            Some(path) => PhraseDictionary::from_file(path)?,
            None => PhraseDictionary::builtin(),
        };
        let catalog = match &cfg.interjections {
            Some(path) => InterjectionCatalog::from_file(path)?,
            None => InterjectionCatalog::builtin(),
        };

        info!(
            rules = dictionary.len(),
            dropped = dictionary.dropped(),
            interjections = catalog.len(),
            "Humanizer initialized"
        );

        Ok(Self::new(Arc::new(dictionary), catalog, &cfg.settings))
    }

    /// Run the full pipeline on `text`.
    ///
    /// Stage failures inside the pipeline never surface: the fallback
    /// stage swallows collaborator errors, and every other stage is a
    /// pure transformation. The only error a caller can see is
    /// [`HumanizeError::EmptyInput`].
    #[instrument(skip_all, fields(input_bytes = text.len(), intensity = ?options.intensity))]
    pub async fn humanize_with_diff(
        &self,
        text: &str,
        options: &HumanizeOptions,
        generative: Option<&dyn GenerativeRewriter>,
    ) -> Result<PipelineResult, HumanizeError> {
        if text.trim().is_empty() {
            return Err(HumanizeError::EmptyInput);
        }

        // Stage 1: deterministic rewrite.
        let rewritten = self.rewriter.rewrite(text);

        // Stage 2: coverage, on the pre-interjection rewrite.
        let total_words = text.split_whitespace().count();
        let coverage = measure_coverage(text, &rewritten.spans, total_words);
        debug!(
            matched = coverage.matched_phrase_count,
            ratio = coverage.coverage_ratio,
            "Deterministic rewrite measured"
        );

        // Stage 3: fallback decision against the original text.
        let merged = self
            .coordinator
            .decide_and_merge(coverage.coverage_ratio, text, rewritten.text, generative)
            .await;

        // Stage 4: interjections on whichever text became final.
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let final_text = self
            .injector
            .inject(&merged.text, options.intensity, &mut rng);

        // Stage 5: diff against the original input, for display.
        let segments = compute_diff(text, &final_text);

        info!(
            used_fallback = merged.used_fallback,
            segments = segments.len(),
            "Pipeline run complete"
        );

        Ok(PipelineResult {
            final_text,
            segments,
            coverage,
            used_fallback: merged.used_fallback,
        })
    }
}
