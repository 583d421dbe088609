//! Command-line interface for the humanizer.
//!
//! Provides commands for running the pipeline on text, inspecting the
//! loaded dictionary, and showing resolved configuration.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::CommandRewriter;
use crate::core::{HumanizeOptions, Humanizer};
use crate::dictionary::PhraseDictionary;
use crate::diff::{DiffSegment, SegmentKind};
use crate::inject::Intensity;

/// humanizer - deterministic AI-text humanization pipeline
#[derive(Parser, Debug)]
#[command(name = "humanizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Humanize text and print the result
    Run {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Insertion intensity
        #[arg(long, value_enum, default_value = "balanced")]
        intensity: Intensity,

        /// Fix the random seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the full result contract as JSON
        #[arg(long)]
        json: bool,

        /// Show an inline rendering of the diff
        #[arg(long)]
        diff: bool,

        /// Command line to use as the generative fallback provider
        /// (text is piped to its stdin)
        #[arg(long)]
        fallback_cmd: Option<String>,
    },

    /// Inspect the dictionary that would be used
    Dict {
        /// Rule file to inspect instead of the configured one
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                input,
                intensity,
                seed,
                json,
                diff,
                fallback_cmd,
            } => run_text(input, intensity, seed, json, diff, fallback_cmd).await,
            Commands::Dict { file } => inspect_dictionary(file),
            Commands::Config => show_config(),
        }
    }
}

/// Run the pipeline on file or stdin input
async fn run_text(
    input_file: Option<PathBuf>,
    intensity: Intensity,
    seed: Option<u64>,
    json: bool,
    show_diff: bool,
    fallback_cmd: Option<String>,
) -> Result<()> {
    let text = read_input(input_file)?;

    let humanizer = Humanizer::from_config()?;
    let fallback = fallback_cmd
        .as_deref()
        .and_then(CommandRewriter::from_command_line);

    let options = HumanizeOptions { intensity, seed };
    let result = humanizer
        .humanize_with_diff(
            &text,
            &options,
            fallback
                .as_ref()
                .map(|f| f as &dyn crate::adapters::GenerativeRewriter),
        )
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.final_text);
    eprintln!(
        "coverage: {:.1}% ({} phrases over {} words){}",
        result.coverage.coverage_ratio * 100.0,
        result.coverage.matched_phrase_count,
        result.coverage.total_word_count,
        if result.used_fallback {
            ", generative fallback used"
        } else {
            ""
        }
    );

    if show_diff {
        eprintln!("{}", render_diff(&result.segments));
    }

    Ok(())
}

/// Inline diff rendering: deletions in [-...-], insertions in {+...+}
fn render_diff(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Equal => out.push_str(&segment.original_text),
            SegmentKind::Deleted => {
                out.push_str("[-");
                out.push_str(&segment.original_text);
                out.push_str("-]");
            }
            SegmentKind::Inserted => {
                out.push_str("{+");
                out.push_str(&segment.final_text);
                out.push_str("+}");
            }
            SegmentKind::Replaced => {
                out.push_str("[-");
                out.push_str(&segment.original_text);
                out.push_str("-]{+");
                out.push_str(&segment.final_text);
                out.push_str("+}");
            }
        }
    }
    out
}

/// Load and report on the dictionary
fn inspect_dictionary(file: Option<PathBuf>) -> Result<()> {
    let dictionary = match file {
        Some(path) => PhraseDictionary::from_file(&path)?,
        None => match &crate::config::config()?.dictionary {
            Some(path) => PhraseDictionary::from_file(path)?,
            None => PhraseDictionary::builtin(),
        },
    };

    println!(
        "{} rules loaded ({} dropped)",
        dictionary.len(),
        dictionary.dropped()
    );
    for rule in dictionary.rules().take(10) {
        println!("  {:40} -> {}", rule.pattern, rule.replacement);
    }
    if dictionary.len() > 10 {
        println!("  ... {} more", dictionary.len() - 10);
    }

    Ok(())
}

/// Print resolved configuration
fn show_config() -> Result<()> {
    let cfg = crate::config::config()?;

    println!("coverage_threshold: {}", cfg.settings.coverage_threshold);
    println!(
        "fallback_timeout_seconds: {}",
        cfg.settings.fallback_timeout.as_secs()
    );
    println!(
        "intensity: light={} balanced={} heavy={}",
        cfg.settings.intensity.light, cfg.settings.intensity.balanced, cfg.settings.intensity.heavy
    );
    match &cfg.dictionary {
        Some(path) => println!("dictionary: {}", path.display()),
        None => println!("dictionary: (built-in)"),
    }
    match &cfg.interjections {
        Some(path) => println!("interjections: {}", path.display()),
        None => println!("interjections: (built-in)"),
    }
    match &cfg.config_file {
        Some(path) => println!("config_file: {}", path.display()),
        None => println!("config_file: (none found)"),
    }

    Ok(())
}

/// Read input text from a file or stdin
fn read_input(input_file: Option<PathBuf>) -> Result<String> {
    match input_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diff_markers() {
        let segments = vec![
            DiffSegment {
                kind: SegmentKind::Equal,
                original_text: "keep ".to_string(),
                final_text: "keep ".to_string(),
            },
            DiffSegment {
                kind: SegmentKind::Replaced,
                original_text: "old".to_string(),
                final_text: "new".to_string(),
            },
        ];
        assert_eq!(render_diff(&segments), "keep [-old-]{+new+}");
    }
}
