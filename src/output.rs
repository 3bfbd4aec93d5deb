//! Output rendering for lint and fix results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::catalog::Catalog;
use crate::config::{Mode, OutputFormat};
use crate::fix;
use crate::lint::FixReport;
use crate::models::LintResult;
use crate::utils::{colors_enabled, error_prefix, fix_prefix, info_prefix, ok_prefix};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Opening line announcing the mode.
pub fn print_banner(mode: Mode) {
    match mode {
        Mode::Check => println!("Checking AEP markdown links for violations..."),
        Mode::Fix => println!("Fixing AEP markdown links..."),
    }
}

/// Print the catalog size and its identifiers in sorted order.
pub fn print_catalog(catalog: &Catalog) {
    println!(
        "{} Found {} existing AEPs: [{}]",
        info_prefix(),
        catalog.len(),
        catalog.sorted().join(", ")
    );
}

pub fn print_documents(count: usize) {
    println!("{} Found {} markdown files to process", info_prefix(), count);
}

/// Print lint results in the requested format.
///
/// In JSON mode nothing is printed here; `print_json` emits the combined
/// document once the fix pass is over.
pub fn print_lint(res: &LintResult, output: OutputFormat) {
    if output == OutputFormat::Json {
        return;
    }
    if res.issues.is_empty() {
        println!("\n{} All links are valid!", ok_prefix());
        return;
    }
    println!(
        "\n{} Found {} validation errors:",
        error_prefix(),
        res.issues.len()
    );
    let color = colors_enabled();
    for issue in &res.issues {
        match issue.line {
            Some(line) if color => println!(
                "  {}:{}: {} {}",
                issue.file.bold(),
                line,
                issue.message,
                format!("({})", issue.rule.id()).bright_black()
            ),
            _ => println!("  {issue}"),
        }
    }
}

/// Print the fix pass: each fix, each rewritten file, and the outcome.
///
/// Files are listed in pass order. The file whose write failed still
/// shows the fixes that were attempted on it.
pub fn print_fixes(res: &LintResult, report: &FixReport, output: OutputFormat) {
    if output == OutputFormat::Json || res.fixes.is_empty() {
        return;
    }
    println!("\n{} Applying {} fixes...", fix_prefix(), res.fix_count());
    for (i, file_fixes) in res.fixes.iter().enumerate() {
        let applied = report.applied.get(i);
        let failed = report
            .failure
            .as_ref()
            .filter(|(path, _)| applied.is_none() && *path == file_fixes.path);
        if applied.is_none() && failed.is_none() {
            break;
        }
        for fix in &file_fixes.fixes {
            println!("  Fixing: {}", fix.description);
        }
        if let Some((path, err)) = failed {
            println!(
                "  {} Failed to fix issues in {}: {}",
                error_prefix(),
                path.display(),
                err
            );
            break;
        }
        if let Some(applied) = applied {
            if applied.changed {
                println!("  Fixed {} issues in {}", applied.fixes, applied.file);
            }
            if !applied.stale_lines.is_empty() {
                let lines: Vec<String> =
                    applied.stale_lines.iter().map(|l| l.to_string()).collect();
                println!(
                    "  {} Could not fix line(s) {} in {}",
                    error_prefix(),
                    lines.join(", "),
                    applied.file
                );
            }
        }
    }
    if report.is_success() && report.unresolved() == 0 {
        println!("{} All fixes applied successfully!", ok_prefix());
    }
}

/// Print the summary line after fixes have been applied.
pub fn print_summary(
    res: &LintResult,
    report: Option<&FixReport>,
    mode: Mode,
    output: OutputFormat,
) {
    if output == OutputFormat::Json {
        return;
    }
    let remaining = match (mode, report) {
        (Mode::Fix, Some(r)) => res.unfixable() + r.unresolved(),
        (Mode::Fix, None) => res.unfixable(),
        (Mode::Check, _) => res.summary.violations,
    };
    let summary = format!(
        "— Summary — violations={} fixable={} remaining={} files={} aeps={}",
        res.summary.violations,
        res.summary.fixable,
        remaining,
        res.summary.files,
        res.summary.identifiers
    );
    if colors_enabled() {
        println!("{}", summary.bold());
    } else {
        println!("{summary}");
    }
}

/// Report a fatal startup error.
///
/// Human mode keeps it on stdout next to the rest of the report; JSON mode
/// sends it to stderr so stdout stays parseable.
pub fn print_fatal(err: &dyn std::fmt::Display, output: OutputFormat) {
    match output {
        OutputFormat::Human => println!("{} {}", error_prefix(), err),
        OutputFormat::Json => eprintln!("{} {}", error_prefix(), err),
    }
}

/// Print the combined JSON document.
pub fn print_json(res: &LintResult, report: Option<&FixReport>) {
    match serde_json::to_string_pretty(&compose_lint_json(res, report)) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("{} {}", error_prefix(), e),
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult, report: Option<&FixReport>) -> JsonVal {
    let applied_files: Vec<&str> = report
        .map(|r| r.applied.iter().map(|a| a.file.as_str()).collect())
        .unwrap_or_default();
    let fixes: Vec<_> = res
        .fixes
        .iter()
        .map(|ff| {
            let file = ff.path.display().to_string();
            let applied = applied_files.contains(&file.as_str());
            let by_line = fix::group_by_line(&ff.fixes);
            json!({
                "file": file,
                "applied": applied,
                "fixes": ff.fixes.iter().map(|f| {
                    // what the line reads once every fix on it is combined
                    let replacement = by_line
                        .get(&f.line_index)
                        .map(|same| fix::compose_line(&f.original, same))
                        .unwrap_or_else(|| f.replacement());
                    json!({
                        "line": f.line_index + 1,
                        "description": f.description,
                        "original": f.original,
                        "replacement": replacement,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();
    let failure = report
        .and_then(|r| r.failure.as_ref())
        .map(|(path, err)| json!({"file": path.display().to_string(), "error": err.to_string()}));
    json!({
        "issues": res.issues,
        "fixes": fixes,
        "failure": failure,
        "summary": {
            "violations": res.summary.violations,
            "fixable": res.summary.fixable,
            "unfixable": res.unfixable(),
            "files": res.summary.files,
            "identifiers": res.summary.identifiers,
            "applied": applied_files.len(),
            "unresolved": report.map(FixReport::unresolved).unwrap_or(0),
        },
    })
}
