//! Subprocess-backed generative rewriter.
//!
//! Pipes the text to an external command's stdin and reads the rewrite
//! from stdout. This is how the CLI wires an LLM CLI (ollama, llm, a
//! product-specific tool) in as the fallback provider.

use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::GenerativeRewriter;

/// Generative rewriter that shells out to an external command
pub struct CommandRewriter {
    program: String,
    args: Vec<String>,
}

impl CommandRewriter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a single command line, split on whitespace
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[async_trait]
impl GenerativeRewriter for CommandRewriter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn rewrite(&self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The coordinator may drop this future on timeout; the child
            // must not outlive it.
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn rewrite command '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .context("Failed to write text to rewrite command stdin")?;
            // Drop stdin to signal EOF
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("Failed to wait for rewrite command '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            anyhow::bail!(
                "Rewrite command '{}' failed with exit code {}: {}",
                self.program,
                exit_code,
                stderr.trim()
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("Rewrite command output is not valid UTF-8")?;

        Ok(stdout.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_parsing() {
        let rewriter = CommandRewriter::from_command_line("ollama run llama3").unwrap();
        assert_eq!(rewriter.name(), "ollama");
        assert_eq!(rewriter.args, vec!["run", "llama3"]);
    }

    #[test]
    fn test_empty_command_line_rejected() {
        assert!(CommandRewriter::from_command_line("   ").is_none());
    }

    #[tokio::test]
    async fn test_cat_round_trips() {
        let rewriter = CommandRewriter::new("cat", vec![]);
        let out = rewriter.rewrite("hello there").await.unwrap();
        assert_eq!(out, "hello there");
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let rewriter = CommandRewriter::new("definitely-not-a-real-binary", vec![]);
        assert!(rewriter.rewrite("text").await.is_err());
    }
}
