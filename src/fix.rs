//! Line-level fix application.
//!
//! Design notes:
//! - Lines keep their original terminator, so CRLF and a missing final
//!   newline survive a rewrite untouched.
//! - Lines are rewritten in descending index order. Every fix today edits a
//!   single line in place; if a fix ever inserts or deletes lines, later
//!   indices stay valid under this ordering.
//! - Fixes sharing a line are composed. Definition removals run first and
//!   then substitutions, each against the line as the previous edit left
//!   it. A substitution whose text has already been removed is a no-op.

use crate::error::FixError;
use crate::models::Fix;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Result of rewriting one document.
pub struct Rewrite {
    pub content: String,
    /// 1-based lines whose fixes left them byte-identical.
    pub stale_lines: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// What happened on disk for one document.
pub struct Outcome {
    pub changed: bool,
    pub stale_lines: Vec<usize>,
}

/// Rewrite `path` in place with `fixes`.
///
/// The file is only written when its bytes change.
pub fn apply_fixes(path: &Path, fixes: &[Fix]) -> Result<Outcome, FixError> {
    if fixes.is_empty() {
        return Ok(Outcome::default());
    }
    let content = fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rewrite = rewrite(path, &content, fixes)?;
    let changed = rewrite.content != content;
    if changed {
        fs::write(path, &rewrite.content).map_err(|source| FixError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(file = %path.display(), fixes = fixes.len(), "rewrote document");
    }
    if !rewrite.stale_lines.is_empty() {
        tracing::warn!(
            file = %path.display(),
            lines = ?rewrite.stale_lines,
            "fixes left lines unchanged"
        );
    }
    Ok(Outcome {
        changed,
        stale_lines: rewrite.stale_lines,
    })
}

/// Apply `fixes` to `content` without touching the filesystem.
///
/// `path` only labels errors.
pub fn rewrite(path: &Path, content: &str, fixes: &[Fix]) -> Result<Rewrite, FixError> {
    let mut lines: Vec<String> = content.split_inclusive('\n').map(String::from).collect();
    let mut stale_lines = Vec::new();

    for (index, line_fixes) in group_by_line(fixes).into_iter().rev() {
        let len = lines.len();
        let Some(line) = lines.get_mut(index) else {
            return Err(FixError::LineOutOfRange {
                path: path.to_path_buf(),
                line: index + 1,
                len,
            });
        };
        let updated = compose_line(line.as_str(), &line_fixes);
        if updated == *line {
            stale_lines.push(index + 1);
        }
        *line = updated;
    }
    stale_lines.sort_unstable();
    Ok(Rewrite {
        content: lines.concat(),
        stale_lines,
    })
}

/// Fixes keyed by line index, in discovery order within a line.
pub fn group_by_line(fixes: &[Fix]) -> BTreeMap<usize, Vec<&Fix>> {
    let mut by_line: BTreeMap<usize, Vec<&Fix>> = BTreeMap::new();
    for fix in fixes {
        by_line.entry(fix.line_index).or_default().push(fix);
    }
    by_line
}

/// Combine every fix targeting one line, starting from `line`.
pub fn compose_line(line: &str, fixes: &[&Fix]) -> String {
    let mut ordered = fixes.to_vec();
    // stable: removals first, discovery order otherwise
    ordered.sort_by_key(|f| !f.edit.is_removal());
    let mut current = line.to_string();
    for fix in ordered {
        current = fix.edit.apply(&current);
    }
    if line.ends_with('\n') && !current.ends_with('\n') {
        current.push('\n');
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Edit;
    use tempfile::tempdir;

    fn substitute(line_index: usize, original: &str, from: &str, to: &str) -> Fix {
        Fix {
            line_index,
            original: original.into(),
            edit: Edit::Substitute {
                from: from.into(),
                to: to.into(),
            },
            description: format!("{from} -> {to}"),
        }
    }

    fn removal(line_index: usize, original: &str, construct: &str) -> Fix {
        Fix {
            line_index,
            original: original.into(),
            edit: Edit::RemoveDefinition {
                construct: construct.into(),
            },
            description: String::new(),
        }
    }

    #[test]
    fn test_rewrite_multiple_lines_any_order() {
        let content = "a [x](one.md)\nb\nc [y](two.md)\n";
        let fixes = vec![
            substitute(0, "a [x](one.md)\n", "one.md", "one"),
            substitute(2, "c [y](two.md)\n", "two.md", "two"),
        ];
        let out = rewrite(Path::new("f"), content, &fixes).unwrap().content;
        assert_eq!(out, "a [x](one)\nb\nc [y](two)\n");
    }

    #[test]
    fn test_removal_keeps_line_and_break() {
        let content = "intro\n[aep-9]: ./0009.md\nend";
        let fixes = vec![
            substitute(1, "[aep-9]: ./0009.md\n", "./0009.md", "./0009"),
            removal(1, "[aep-9]: ./0009.md\n", "[aep-9]: ./0009.md"),
        ];
        let out = rewrite(Path::new("f"), content, &fixes).unwrap().content;
        assert_eq!(out, "intro\n\nend");
    }

    #[test]
    fn test_removal_on_last_line_without_break() {
        let content = "intro\n[aep-9]: ./0009";
        let fixes = vec![removal(1, "[aep-9]: ./0009", "[aep-9]: ./0009")];
        let out = rewrite(Path::new("f"), content, &fixes).unwrap().content;
        assert_eq!(out, "intro\n");
    }

    #[test]
    fn test_substitutions_on_same_line_compose() {
        let line = "See [aep-5][aep-5] and [g](./g.md)\n";
        let fixes = vec![
            substitute(0, line, "./g.md", "./g"),
            substitute(0, line, "[aep-5][aep-5]", "aep-5"),
        ];
        let out = rewrite(Path::new("f"), line, &fixes).unwrap().content;
        assert_eq!(out, "See aep-5 and [g](./g)\n");
    }

    #[test]
    fn test_fix_that_matches_nothing_is_stale() {
        let content = "[aep-9]:   ./0009\nkeep\n";
        let fixes = vec![removal(0, "[aep-9]:   ./0009\n", "[aep-9]: ./0009")];
        let out = rewrite(Path::new("f"), content, &fixes).unwrap();
        assert_eq!(out.content, content);
        assert_eq!(out.stale_lines, vec![1]);
    }

    #[test]
    fn test_stale_fix_does_not_touch_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aep.md.j2");
        fs::write(&path, "no match here\n").unwrap();
        let fixes = vec![substitute(0, "no match here\n", "x.md", "x")];
        let outcome = apply_fixes(&path, &fixes).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.stale_lines, vec![1]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "no match here\n");
    }

    #[test]
    fn test_compose_line_matches_rewrite() {
        let line = "[aep-9]: ./0009.md\n";
        let fixes = vec![
            substitute(0, line, "./0009.md", "./0009"),
            removal(0, line, "[aep-9]: ./0009.md"),
        ];
        let refs: Vec<&Fix> = fixes.iter().collect();
        assert_eq!(compose_line(line, &refs), "\n");
    }

    #[test]
    fn test_crlf_is_preserved() {
        let content = "[a](b.md)\r\nnext\r\n";
        let fixes = vec![substitute(0, "[a](b.md)\r\n", "b.md", "b")];
        let out = rewrite(Path::new("f"), content, &fixes).unwrap().content;
        assert_eq!(out, "[a](b)\r\nnext\r\n");
    }

    #[test]
    fn test_out_of_range_line_is_an_error() {
        let fixes = vec![substitute(5, "", "x", "y")];
        let err = rewrite(Path::new("f"), "one\n", &fixes).unwrap_err();
        assert!(matches!(err, FixError::LineOutOfRange { line: 6, len: 1, .. }));
    }

    #[test]
    fn test_apply_fixes_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aep.md.j2");
        fs::write(&path, "See [aep-5][aep-5] for details.\n").unwrap();
        let fixes = vec![substitute(
            0,
            "See [aep-5][aep-5] for details.\n",
            "[aep-5][aep-5]",
            "aep-5",
        )];
        let outcome = apply_fixes(&path, &fixes).unwrap();
        assert!(outcome.changed);
        assert!(outcome.stale_lines.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "See aep-5 for details.\n"
        );
    }

    #[test]
    fn test_no_fixes_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aep.md.j2");
        fs::write(&path, "untouched").unwrap();
        assert!(!apply_fixes(&path, &[]).unwrap().changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "untouched");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.md.j2");
        let fixes = vec![substitute(0, "", "x", "y")];
        assert!(matches!(
            apply_fixes(&path, &fixes),
            Err(FixError::Read { .. })
        ));
    }
}
