//! Effective settings resolution.
//!
//! Everything is driven by command flags; there is no configuration file.
//! Defaults:
//! - `path`: `aep/general`
//! - `pattern`: `**/*.md.j2`
//! - `output`: `human`
//! - mode: fix, unless `--check` is given
//!
//! Overrides precedence: CLI > defaults.

use std::path::PathBuf;

pub const DEFAULT_ROOT: &str = "aep/general";
pub const DEFAULT_PATTERN: &str = "**/*.md.j2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether violations are only reported or also repaired.
pub enum Mode {
    Check,
    Fix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
/// Report rendering.
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run.
pub struct Effective {
    pub root: PathBuf,
    pub pattern: String,
    pub output: OutputFormat,
    pub mode: Mode,
}

/// Resolve `Effective` from CLI flags and defaults.
pub fn resolve_effective(
    cli_path: Option<&str>,
    cli_pattern: Option<&str>,
    cli_output: Option<OutputFormat>,
    check: bool,
) -> Effective {
    let root = PathBuf::from(cli_path.unwrap_or(DEFAULT_ROOT));
    let pattern = cli_pattern
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PATTERN)
        .to_string();
    Effective {
        root,
        pattern,
        output: cli_output.unwrap_or_default(),
        mode: if check { Mode::Check } else { Mode::Fix },
    }
}
