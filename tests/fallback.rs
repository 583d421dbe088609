//! Fallback Integration Tests
//!
//! Verifies the coverage-gated generative fallback: adoption on success,
//! degradation on failure and timeout, and the subprocess provider.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use humanizer::config::{IntensityProfile, PipelineSettings};
use humanizer::inject::InterjectionCatalog;
use humanizer::{CommandRewriter, GenerativeRewriter, HumanizeOptions, Humanizer, PhraseDictionary};

struct FixedRewriter(&'static str);

#[async_trait]
impl GenerativeRewriter for FixedRewriter {
    fn name(&self) -> &str {
        "fixed"
    }
    async fn rewrite(&self, _text: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingRewriter;

#[async_trait]
impl GenerativeRewriter for FailingRewriter {
    fn name(&self) -> &str {
        "failing"
    }
    async fn rewrite(&self, _text: &str) -> Result<String> {
        anyhow::bail!("provider down")
    }
}

struct SlowRewriter;

#[async_trait]
impl GenerativeRewriter for SlowRewriter {
    fn name(&self) -> &str {
        "slow"
    }
    async fn rewrite(&self, _text: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

/// Humanizer with an empty dictionary (coverage always 0) and
/// interjections disabled, so only the fallback path matters.
fn low_coverage_humanizer(timeout: Duration) -> Humanizer {
    let settings = PipelineSettings {
        coverage_threshold: 0.35,
        fallback_timeout: timeout,
        intensity: IntensityProfile {
            light: 0.0,
            balanced: 0.0,
            heavy: 0.0,
        },
    };
    Humanizer::new(
        Arc::new(PhraseDictionary::from_pairs(&[])),
        InterjectionCatalog::builtin(),
        &settings,
    )
}

const INPUT: &str = "nothing here matches any rule at all";

#[tokio::test]
async fn test_collaborator_success_adopts_output() {
    let humanizer = low_coverage_humanizer(Duration::from_secs(5));
    let provider = FixedRewriter("A fully generative rewrite.");

    let result = humanizer
        .humanize_with_diff(INPUT, &HumanizeOptions::default(), Some(&provider))
        .await
        .unwrap();

    assert!(result.used_fallback);
    assert_eq!(result.final_text, "A fully generative rewrite.");
}

#[tokio::test]
async fn test_collaborator_failure_keeps_deterministic_text() {
    let humanizer = low_coverage_humanizer(Duration::from_secs(5));

    let result = humanizer
        .humanize_with_diff(INPUT, &HumanizeOptions::default(), Some(&FailingRewriter))
        .await
        .unwrap();

    assert!(!result.used_fallback);
    // Deterministic rewrite of a no-match input only repairs capitalization.
    assert_eq!(result.final_text, "Nothing here matches any rule at all");
}

#[tokio::test]
async fn test_collaborator_timeout_keeps_deterministic_text() {
    let humanizer = low_coverage_humanizer(Duration::from_millis(50));

    let result = humanizer
        .humanize_with_diff(INPUT, &HumanizeOptions::default(), Some(&SlowRewriter))
        .await
        .unwrap();

    assert!(!result.used_fallback);
    assert_eq!(result.final_text, "Nothing here matches any rule at all");
}

#[tokio::test]
async fn test_high_coverage_never_calls_collaborator() {
    // Dictionary match covers most of the text, so coverage clears the
    // threshold and even a slow provider is never consulted.
    let settings = PipelineSettings {
        coverage_threshold: 0.35,
        fallback_timeout: Duration::from_millis(100),
        intensity: IntensityProfile {
            light: 0.0,
            balanced: 0.0,
            heavy: 0.0,
        },
    };
    let humanizer = Humanizer::new(
        Arc::new(PhraseDictionary::from_pairs(&[(
            "demonstrates significant improvements",
            "really helped a lot",
        )])),
        InterjectionCatalog::builtin(),
        &settings,
    );

    let result = humanizer
        .humanize_with_diff(
            "The implementation demonstrates significant improvements.",
            &HumanizeOptions::default(),
            Some(&SlowRewriter),
        )
        .await
        .unwrap();

    assert!(!result.used_fallback);
    assert_eq!(result.final_text, "The implementation really helped a lot.");
}

#[tokio::test]
async fn test_subprocess_provider_round_trip() {
    let humanizer = low_coverage_humanizer(Duration::from_secs(10));
    let provider = CommandRewriter::new("tr", vec!["a-z".to_string(), "A-Z".to_string()]);

    let result = humanizer
        .humanize_with_diff(INPUT, &HumanizeOptions::default(), Some(&provider))
        .await
        .unwrap();

    assert!(result.used_fallback);
    assert_eq!(result.final_text, INPUT.to_uppercase());
}
