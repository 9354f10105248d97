//! Configuration loaded from `.riskmap.toml`, searched upward from the
//! current directory. Missing or broken config never stops a run; every
//! field has a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::io::output::OutputFormat;

pub const CONFIG_FILE_NAME: &str = ".riskmap.toml";

/// Report command configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many of the highest rated answers the terminal report lists
    /// (0 hides the section)
    #[serde(default = "default_top_answers")]
    pub top_answers: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_answers: default_top_answers(),
        }
    }
}

fn default_top_answers() -> usize {
    5
}

/// Check command configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Rating at which the check fails, e.g. "Severe"; the check fails
    /// when the overall rating reaches it. Unset falls back to Severe.
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Fail when questions are unanswered or the background section is
    /// incomplete
    #[serde(default = "default_require_complete")]
    pub require_complete: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on: None,
            require_complete: default_require_complete(),
        }
    }
}

fn default_require_complete() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when --format is not given
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskmapConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Cache the configuration
static CONFIG: OnceLock<RiskmapConfig> = OnceLock::new();

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<RiskmapConfig, String> {
    parse_and_validate_config_impl(contents)
}

fn parse_and_validate_config_impl(contents: &str) -> Result<RiskmapConfig, String> {
    let mut config = toml::from_str::<RiskmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    // Blank fail_on means unset; an unknown rating is rejected later,
    // when the check command resolves its gate.
    if let Some(fail_on) = &config.check.fail_on {
        if fail_on.trim().is_empty() {
            config.check.fail_on = None;
        }
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<RiskmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config_impl(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

#[cfg(test)]
pub(crate) fn directory_ancestors(
    start: PathBuf,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    directory_ancestors_impl(start, max_depth)
}

fn directory_ancestors_impl(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

pub fn load_config() -> RiskmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RiskmapConfig::default();
        }
    };

    directory_ancestors_impl(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RiskmapConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static RiskmapConfig {
    CONFIG.get_or_init(load_config)
}

/// Starter configuration written by `riskmap init`.
pub fn config_template() -> String {
    [
        "# riskmap configuration",
        "",
        "[report]",
        "# Highest rated answers listed in the terminal report (0 hides them).",
        "top_answers = 5",
        "",
        "[check]",
        "# Fail the check when the overall rating reaches this level.",
        "# fail_on = \"Severe\"",
        "# Fail the check when the assessment is incomplete.",
        "require_complete = true",
        "",
        "[output]",
        "# Format used when --format is not given: terminal, json or markdown.",
        "# default_format = \"terminal\"",
        "",
    ]
    .join("\n")
}
