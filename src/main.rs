//! aep-links CLI binary entry point.
//! Builds the catalog, checks documents, optionally fixes them, and sets
//! the exit status.

use aep_links::catalog::build_catalog;
use aep_links::cli::Cli;
use aep_links::config::{self, Mode, OutputFormat};
use aep_links::{lint, output};
use clap::Parser;

/// Violations remain.
const EXIT_VIOLATIONS: i32 = 1;
/// Missing root, bad pattern, or a failed rewrite.
const EXIT_FATAL: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.setup_logging();

    let eff = config::resolve_effective(
        cli.path.as_deref(),
        cli.pattern.as_deref(),
        cli.output,
        cli.check,
    );
    let human = eff.output == OutputFormat::Human;
    tracing::info!(root = %eff.root.display(), pattern = %eff.pattern, mode = ?eff.mode, "starting");

    if human {
        output::print_banner(eff.mode);
    }

    let catalog = match build_catalog(&eff.root) {
        Ok(c) => c,
        Err(e) => {
            output::print_fatal(&e, eff.output);
            std::process::exit(EXIT_FATAL);
        }
    };
    if human {
        output::print_catalog(&catalog);
    }

    let documents = match lint::discover_documents(&eff.root, &eff.pattern) {
        Ok(d) => d,
        Err(e) => {
            output::print_fatal(&e, eff.output);
            std::process::exit(EXIT_FATAL);
        }
    };
    if human {
        output::print_documents(documents.len());
    }

    let result = lint::run_lint(&documents, &catalog);
    output::print_lint(&result, eff.output);

    let report = match eff.mode {
        Mode::Check => None,
        Mode::Fix => {
            let report = lint::apply_all(&result.fixes);
            output::print_fixes(&result, &report, eff.output);
            Some(report)
        }
    };
    output::print_summary(&result, report.as_ref(), eff.mode, eff.output);
    if eff.output == OutputFormat::Json {
        output::print_json(&result, report.as_ref());
    }

    let code = match (eff.mode, report) {
        (_, Some(r)) if !r.is_success() => EXIT_FATAL,
        (Mode::Check, _) if result.summary.violations > 0 => EXIT_VIOLATIONS,
        (Mode::Fix, Some(r)) if result.unfixable() + r.unresolved() > 0 => EXIT_VIOLATIONS,
        _ => 0,
    };
    if code != 0 {
        std::process::exit(code);
    }
}
