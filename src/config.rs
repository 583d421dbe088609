//! Configuration for the humanization pipeline.
//!
//! The coverage threshold and the intensity-to-probability map are tuned
//! constants, so they live in configuration rather than at call sites.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (HUMANIZER_COVERAGE_THRESHOLD, ...)
//! 2. Config file (.humanizer/config.yaml)
//! 3. Built-in defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .humanizer/config.yaml
//! - Paths in the config file are relative to the config file's parent
//!   directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::inject::Intensity;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub coverage_threshold: Option<f64>,
    #[serde(default)]
    pub fallback_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub intensity: Option<IntensityProfile>,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Dictionary rule file (relative to config file)
    pub dictionary: Option<String>,
    /// Interjection catalog file (relative to config file)
    pub interjections: Option<String>,
}

/// Per-intensity insertion probability
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IntensityProfile {
    #[serde(default = "default_light")]
    pub light: f64,
    #[serde(default = "default_balanced")]
    pub balanced: f64,
    #[serde(default = "default_heavy")]
    pub heavy: f64,
}

fn default_light() -> f64 {
    0.15
}
fn default_balanced() -> f64 {
    0.30
}
fn default_heavy() -> f64 {
    0.50
}

impl Default for IntensityProfile {
    fn default() -> Self {
        Self {
            light: default_light(),
            balanced: default_balanced(),
            heavy: default_heavy(),
        }
    }
}

impl IntensityProfile {
    /// Insertion probability for an intensity, clamped to [0, 1]
    pub fn probability(&self, intensity: Intensity) -> f64 {
        let p = match intensity {
            Intensity::Light => self.light,
            Intensity::Balanced => self.balanced,
            Intensity::Heavy => self.heavy,
        };
        p.clamp(0.0, 1.0)
    }
}

/// Tunables the pipeline consumes directly
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Coverage ratio below which the generative fallback is considered
    pub coverage_threshold: f64,
    /// Bounded wait on the generative collaborator
    pub fallback_timeout: Duration,
    /// Intensity-to-probability map for interjections
    pub intensity: IntensityProfile,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            coverage_threshold: 0.35,
            fallback_timeout: Duration::from_secs(20),
            intensity: IntensityProfile::default(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Pipeline tunables
    pub settings: PipelineSettings,
    /// Dictionary rule file, if configured
    pub dictionary: Option<PathBuf>,
    /// Interjection catalog file, if configured
    pub interjections: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".humanizer").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let defaults = PipelineSettings::default();

    let (file, base_dir) = match config_file {
        Some(ref config_path) => {
            let file = load_config_file(config_path)?;
            // Base directory is the parent of .humanizer/
            let base_dir = config_path
                .parent() // .humanizer/
                .and_then(|p| p.parent()) // project root
                .unwrap_or(Path::new("."))
                .to_path_buf();
            (Some(file), base_dir)
        }
        None => (None, PathBuf::from(".")),
    };

    let coverage_threshold = env_f64("HUMANIZER_COVERAGE_THRESHOLD")
        .or_else(|| file.as_ref().and_then(|f| f.coverage_threshold))
        .unwrap_or(defaults.coverage_threshold)
        .clamp(0.0, 1.0);

    let fallback_timeout = env_u64("HUMANIZER_FALLBACK_TIMEOUT_SECONDS")
        .or_else(|| file.as_ref().and_then(|f| f.fallback_timeout_seconds))
        .map(Duration::from_secs)
        .unwrap_or(defaults.fallback_timeout);

    let intensity = file
        .as_ref()
        .and_then(|f| f.intensity)
        .unwrap_or(defaults.intensity);

    let dictionary = std::env::var("HUMANIZER_DICTIONARY")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.paths.dictionary.as_deref())
                .map(|p| resolve_path(&base_dir, p))
        });

    let interjections = std::env::var("HUMANIZER_INTERJECTIONS")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.paths.interjections.as_deref())
                .map(|p| resolve_path(&base_dir, p))
        });

    Ok(ResolvedConfig {
        settings: PipelineSettings {
            coverage_threshold,
            fallback_timeout,
            intensity,
        },
        dictionary,
        interjections,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
