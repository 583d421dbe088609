//! Generative-rewrite collaborator seam.
//!
//! The pipeline itself is deterministic; when coverage gates in the
//! fallback, it asks an external collaborator for a full generative
//! rewrite. The collaborator is opaque: it returns plain text or fails,
//! and the caller decides what backs it (an LLM API, a local model, a
//! subprocess).

pub mod command;

use anyhow::Result;
use async_trait::async_trait;

pub use command::CommandRewriter;

/// An external generative rewrite provider
#[async_trait]
pub trait GenerativeRewriter: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Rewrite `text` generatively, returning the full replacement text.
    ///
    /// The caller bounds this call with a timeout; implementations do not
    /// need their own deadline handling.
    async fn rewrite(&self, text: &str) -> Result<String>;
}
