//! Core pipeline orchestration.
//!
//! This module contains:
//! - Orchestrator: the single entry point the rest of the product calls

pub mod orchestrator;

// Re-export commonly used types
pub use orchestrator::{HumanizeError, HumanizeOptions, Humanizer, PipelineResult};
