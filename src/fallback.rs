//! Fallback coordination.
//!
//! Coverage is the sole gating signal: below the threshold, and only if a
//! collaborator was supplied, the coordinator requests a generative
//! rewrite of the *original* text. Collaborator failure, timeout, or an
//! empty response all degrade to the deterministic rewrite; none of them
//! surface to the caller as an error.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::adapters::GenerativeRewriter;

/// Final text selection after the fallback decision
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub text: String,
    pub used_fallback: bool,
}

/// Decides whether deterministic rewriting sufficed
pub struct FallbackCoordinator {
    coverage_threshold: f64,
    call_timeout: Duration,
}

impl FallbackCoordinator {
    pub fn new(coverage_threshold: f64, call_timeout: Duration) -> Self {
        Self {
            coverage_threshold,
            call_timeout,
        }
    }

    pub fn coverage_threshold(&self) -> f64 {
        self.coverage_threshold
    }

    /// Apply the gating policy.
    ///
    /// `rewritten` is the deterministic rewrite and is what stands unless
    /// coverage is below threshold *and* a collaborator both exists and
    /// answers in time with non-empty text.
    pub async fn decide_and_merge(
        &self,
        coverage_ratio: f64,
        original: &str,
        rewritten: String,
        generative: Option<&dyn GenerativeRewriter>,
    ) -> MergeOutcome {
        if coverage_ratio >= self.coverage_threshold {
            debug!(
                coverage_ratio,
                threshold = self.coverage_threshold,
                "Coverage sufficient, deterministic rewrite stands"
            );
            return MergeOutcome {
                text: rewritten,
                used_fallback: false,
            };
        }

        let Some(provider) = generative else {
            debug!(coverage_ratio, "Coverage low but no collaborator supplied");
            return MergeOutcome {
                text: rewritten,
                used_fallback: false,
            };
        };

        info!(
            coverage_ratio,
            threshold = self.coverage_threshold,
            provider = provider.name(),
            "Coverage below threshold, requesting generative rewrite"
        );

        match timeout(self.call_timeout, provider.rewrite(original)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                info!(provider = provider.name(), "Adopting generative rewrite");
                MergeOutcome {
                    text,
                    used_fallback: true,
                }
            }
            Ok(Ok(_)) => {
                warn!(
                    provider = provider.name(),
                    "Generative rewrite returned empty text, keeping deterministic output"
                );
                MergeOutcome {
                    text: rewritten,
                    used_fallback: false,
                }
            }
            Ok(Err(e)) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "Generative rewrite failed, keeping deterministic output"
                );
                MergeOutcome {
                    text: rewritten,
                    used_fallback: false,
                }
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_ms = self.call_timeout.as_millis() as u64,
                    "Generative rewrite timed out, keeping deterministic output"
                );
                MergeOutcome {
                    text: rewritten,
                    used_fallback: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

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
            anyhow::bail!("provider unavailable")
        }
    }

    fn coordinator() -> FallbackCoordinator {
        FallbackCoordinator::new(0.35, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_high_coverage_skips_collaborator() {
        let provider = FixedRewriter("generative text");
        let outcome = coordinator()
            .decide_and_merge(0.8, "orig", "deterministic".to_string(), Some(&provider))
            .await;
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.text, "deterministic");
    }

    #[tokio::test]
    async fn test_low_coverage_adopts_collaborator_output() {
        let provider = FixedRewriter("generative text");
        let outcome = coordinator()
            .decide_and_merge(0.1, "orig", "deterministic".to_string(), Some(&provider))
            .await;
        assert!(outcome.used_fallback);
        assert_eq!(outcome.text, "generative text");
    }

    #[tokio::test]
    async fn test_low_coverage_without_collaborator() {
        let outcome = coordinator()
            .decide_and_merge(0.1, "orig", "deterministic".to_string(), None)
            .await;
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.text, "deterministic");
    }

    #[tokio::test]
    async fn test_collaborator_failure_degrades() {
        let outcome = coordinator()
            .decide_and_merge(0.1, "orig", "deterministic".to_string(), Some(&FailingRewriter))
            .await;
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.text, "deterministic");
    }

    #[tokio::test]
    async fn test_empty_collaborator_output_degrades() {
        let provider = FixedRewriter("   ");
        let outcome = coordinator()
            .decide_and_merge(0.1, "orig", "deterministic".to_string(), Some(&provider))
            .await;
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.text, "deterministic");
    }
}
