//! CLI argument parsing via `clap`.

use crate::config::OutputFormat;
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "aep-links",
    version,
    about = "Check and fix links in AEP documents",
    long_about = "aep-links scans AEP template documents for links and validates them:\n  - no links to .md source files (GitHub links excepted)\n  - ./NNNN cross-references point to existing AEPs\n  - http(s) URLs carry a host\n  - [aep-N]: ... reference definitions are removed\n  - [aep-N][aep-N] self-references become plain aep-N\n\nWithout --check, fixable violations are rewritten in place.",
    after_help = "Examples:\n  aep-links --check\n  aep-links --path aep/general\n  aep-links --check --output json"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(long, action = ArgAction::SetTrue, help = "Only check for violations without fixing them")]
    pub check: bool,
    #[arg(long, help = "Path to AEP directory (default: aep/general)")]
    pub path: Option<String>,
    #[arg(long, help = "Document glob below the path (default: **/*.md.j2)")]
    pub pattern: Option<String>,
    #[arg(long, value_enum, help = "Output mode (default: human)")]
    pub output: Option<OutputFormat>,
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Install the `tracing` subscriber. Logs go to stderr.
    pub fn setup_logging(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };
        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_line_number(false);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    }
}
