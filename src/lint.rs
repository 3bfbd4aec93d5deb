//! Lint runner: document discovery, per-file checks, and the fix pass.
//!
//! Produces a `LintResult` with issues, proposed fixes, and a summary. Files
//! are processed one at a time in sorted path order; the only state shared
//! between them is the read-only identifier catalog.

use crate::catalog::Catalog;
use crate::checks::check_content;
use crate::error::{FixError, PatternError};
use crate::fix::apply_fixes;
use crate::models::{FileFixes, Issue, LintResult, Rule, Summary};
use glob::{glob, Pattern};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Find documents under `root` matching `pattern`, sorted by path.
///
/// Unreadable directory entries are skipped with a warning.
pub fn discover_documents(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, PatternError> {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern);
    let entries = glob(&full).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut docs: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => docs.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("skipping {}: {}", e.path().display(), e.error()),
        }
    }
    docs.sort();
    tracing::debug!(count = docs.len(), pattern = %full, "discovered documents");
    Ok(docs)
}

/// Check every document against the rules.
///
/// Unreadable documents are reported as `read-error` issues and skipped.
pub fn run_lint(documents: &[PathBuf], catalog: &Catalog) -> LintResult {
    let mut issues: Vec<Issue> = Vec::new();
    let mut fixes: Vec<FileFixes> = Vec::new();

    for path in documents {
        let file = path.display().to_string();
        let content = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("cannot read {file}: {e}");
                issues.push(Issue {
                    message: format!("Error reading {file}: {e}"),
                    file,
                    line: None,
                    rule: Rule::ReadError,
                });
                continue;
            }
        };
        let report = check_content(&file, &content, catalog);
        tracing::debug!(
            file = %file,
            issues = report.issues.len(),
            fixes = report.fixes.len(),
            "checked document"
        );
        issues.extend(report.issues);
        if !report.fixes.is_empty() {
            fixes.push(FileFixes {
                path: path.clone(),
                fixes: report.fixes,
            });
        }
    }

    let summary = Summary {
        violations: issues.len(),
        fixable: issues.iter().filter(|i| i.rule.is_fixable()).count(),
        files: documents.len(),
        identifiers: catalog.len(),
    };
    LintResult {
        issues,
        fixes,
        summary,
    }
}

#[derive(Debug, Clone, Serialize)]
/// A document rewritten by the fix pass.
pub struct AppliedFile {
    pub file: String,
    pub fixes: usize,
    pub changed: bool,
    /// 1-based lines whose fixes matched nothing.
    pub stale_lines: Vec<usize>,
}

#[derive(Debug, Default)]
/// Outcome of the fix pass.
pub struct FixReport {
    pub applied: Vec<AppliedFile>,
    /// The write that aborted the pass, if any.
    pub failure: Option<(PathBuf, FixError)>,
}

impl FixReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Lines that still hold a fixable violation after the pass.
    pub fn unresolved(&self) -> usize {
        self.applied.iter().map(|a| a.stale_lines.len()).sum()
    }
}

/// Rewrite every document that has fixes.
///
/// Stops at the first document that cannot be rewritten; the remaining
/// documents are left untouched.
pub fn apply_all(fixes: &[FileFixes]) -> FixReport {
    let mut report = FixReport::default();
    for file_fixes in fixes {
        match apply_fixes(&file_fixes.path, &file_fixes.fixes) {
            Ok(outcome) => report.applied.push(AppliedFile {
                file: file_fixes.path.display().to_string(),
                fixes: file_fixes.fixes.len(),
                changed: outcome.changed,
                stale_lines: outcome.stale_lines,
            }),
            Err(e) => {
                tracing::error!("{e}");
                report.failure = Some((file_fixes.path.clone(), e));
                break;
            }
        }
    }
    report
}
