//! Shared data models for extraction, checks, fixes, and lint output.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Syntactic origin of a located link.
pub enum LinkKind {
    /// `[text](url)`
    Inline,
    /// `[name]: value` occupying a whole line
    ReferenceDefinition,
    /// `[aep-N][aep-N]`
    SelfReference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A link found on a given line (1-based).
///
/// For self-reference pairs `target` repeats the bracketed identifier.
/// `raw` is the exact matched text, separators included.
pub struct LocatedLink {
    pub line: usize,
    pub text: String,
    pub target: String,
    pub kind: LinkKind,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
/// The rule a diagnostic was raised under.
pub enum Rule {
    MdLink,
    MissingAep,
    InvalidHttpUrl,
    AepReferenceDefinition,
    SelfReference,
    ReadError,
}

impl Rule {
    pub fn id(self) -> &'static str {
        match self {
            Rule::MdLink => "md-link",
            Rule::MissingAep => "missing-aep",
            Rule::InvalidHttpUrl => "invalid-http-url",
            Rule::AepReferenceDefinition => "aep-reference-definition",
            Rule::SelfReference => "self-reference",
            Rule::ReadError => "read-error",
        }
    }

    /// Whether the rule comes with an automatic repair.
    pub fn is_fixable(self) -> bool {
        matches!(
            self,
            Rule::MdLink | Rule::AepReferenceDefinition | Rule::SelfReference
        )
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single violation. `line` is absent for file-level problems.
pub struct Issue {
    pub file: String,
    pub line: Option<usize>,
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Textual edit applied to the content of one line.
pub enum Edit {
    /// Replace every occurrence of `from` with `to`.
    Substitute { from: String, to: String },
    /// Drop a reference definition, together with its line break when
    /// the break directly follows it.
    RemoveDefinition { construct: String },
}

impl Edit {
    pub fn apply(&self, line: &str) -> String {
        match self {
            Edit::Substitute { from, to } => line.replace(from.as_str(), to),
            Edit::RemoveDefinition { construct } => {
                let with_break = format!("{construct}\n");
                if line.contains(&with_break) {
                    line.replace(&with_break, "")
                } else {
                    line.replace(construct.as_str(), "")
                }
            }
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, Edit::RemoveDefinition { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Proposed repair of a single line.
///
/// `original` holds the full line as read, trailing newline included.
pub struct Fix {
    pub line_index: usize,
    pub original: String,
    pub edit: Edit,
    pub description: String,
}

impl Fix {
    /// The line as it reads when this fix alone is applied.
    pub fn replacement(&self) -> String {
        self.edit.apply(&self.original)
    }
}

#[derive(Debug, Clone, Serialize)]
/// All fixes proposed for one document.
pub struct FileFixes {
    pub path: PathBuf,
    pub fixes: Vec<Fix>,
}

#[derive(Debug, Default, Clone, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub violations: usize,
    pub fixable: usize,
    pub files: usize,
    pub identifiers: usize,
}

#[derive(Debug, Default, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub fixes: Vec<FileFixes>,
    pub summary: Summary,
}

impl LintResult {
    /// Violations that fix mode cannot repair.
    pub fn unfixable(&self) -> usize {
        self.issues.iter().filter(|i| !i.rule.is_fixable()).count()
    }

    pub fn fix_count(&self) -> usize {
        self.fixes.iter().map(|f| f.fixes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_definition_prefers_trailing_break() {
        let edit = Edit::RemoveDefinition {
            construct: "[aep-9]: ./0009.md".into(),
        };
        assert_eq!(edit.apply("[aep-9]: ./0009.md\n"), "");
        assert_eq!(edit.apply("[aep-9]: ./0009.md"), "");
        assert_eq!(edit.apply("  [aep-9]: ./0009.md\r\n"), "  \r\n");
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let fix = Fix {
            line_index: 0,
            original: "[a.md](a.md)\n".into(),
            edit: Edit::Substitute {
                from: "a.md".into(),
                to: "a".into(),
            },
            description: String::new(),
        };
        assert_eq!(fix.replacement(), "[a](a)\n");
    }

    #[test]
    fn test_issue_display() {
        let with_line = Issue {
            file: "aep/general/0001/aep.md.j2".into(),
            line: Some(3),
            rule: Rule::MissingAep,
            message: "Link 'x' references non-existent AEP: ./0005".into(),
        };
        assert_eq!(
            with_line.to_string(),
            "aep/general/0001/aep.md.j2:3: Link 'x' references non-existent AEP: ./0005"
        );
        let without = Issue {
            line: None,
            message: "Error reading f: boom".into(),
            ..with_line
        };
        assert_eq!(without.to_string(), "Error reading f: boom");
    }
}
