//! humanizer - deterministic AI-text humanization pipeline
//!
//! Given AI-generated prose, the pipeline deterministically rewrites
//! phrasing to reduce automated "AI-written" detection scores, produces
//! an aligned diff between original and rewritten text, and decides via
//! a coverage signal whether a secondary generative pass is warranted.
//!
//! # Architecture
//!
//! The pipeline is purely synchronous, CPU-bound text transformation with
//! no shared mutable state: the dictionary and interjection catalog are
//! loaded once and shared read-only across concurrent runs. The single
//! async seam is the optional generative-rewrite collaborator, which is
//! bounded by a timeout and whose failures degrade rather than propagate.
//!
//! # Modules
//!
//! - `dictionary`: ordered rewrite rules and the match scan
//! - `rewrite`: the deterministic rewrite passes
//! - `coverage`: the coverage signal gating the fallback
//! - `inject`: interjection insertion at sentence heads
//! - `fallback`: the generative-fallback decision
//! - `diff`: token-level original-vs-final alignment
//! - `adapters`: the external collaborator seam
//! - `core`: the orchestrator, the only surface callers depend on
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Humanize text
//! echo "It is important to note that we utilize tools." | humanizer run
//!
//! # Full JSON contract, seeded
//! humanizer run --input draft.txt --json --seed 42
//!
//! # Inspect the dictionary
//! humanizer dict
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod coverage;
pub mod dictionary;
pub mod diff;
pub mod fallback;
pub mod inject;
pub mod rewrite;

// Re-export main types at crate root for convenience
pub use adapters::{CommandRewriter, GenerativeRewriter};
pub use crate::core::{HumanizeError, HumanizeOptions, Humanizer, PipelineResult};
pub use coverage::CoverageResult;
pub use dictionary::{MatchSpan, PhraseDictionary, RawRule};
pub use diff::{compute_diff, DiffSegment, SegmentKind};
pub use inject::{Intensity, InterjectionCatalog};
