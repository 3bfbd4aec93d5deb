//! Surface-syntax link extraction.
//!
//! This is a line-oriented pattern scan, not a markdown parser. Inline
//! link text stops at the first `]` and the target stops at the first
//! `)`, so nested brackets or parentheses are captured truncated. Existing
//! documents rely on exactly this behavior.

use crate::models::{LinkKind, LocatedLink};
use regex::Regex;
use std::sync::LazyLock;

static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static REFERENCE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]:\s*(.+)$").unwrap());

static AEP_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[(aep-[0-9]+)\]").unwrap());

/// Links of every kind found in one document.
#[derive(Debug, Default)]
pub struct Extracted {
    pub inline: Vec<LocatedLink>,
    pub definitions: Vec<LocatedLink>,
    pub self_references: Vec<LocatedLink>,
}

impl Extracted {
    /// Inline links followed by reference definitions, the set the URL
    /// rules run over.
    pub fn all_links(&self) -> impl Iterator<Item = &LocatedLink> {
        self.inline.iter().chain(self.definitions.iter())
    }

    /// True when `line` holds a reference definition.
    pub fn is_definition_line(&self, line: usize) -> bool {
        self.definitions.iter().any(|d| d.line == line)
    }
}

pub fn extract(content: &str) -> Extracted {
    Extracted {
        inline: inline_links(content),
        definitions: reference_definitions(content),
        self_references: self_references(content),
    }
}

/// Every `[text](url)` occurrence, several per line allowed.
pub fn inline_links(content: &str) -> Vec<LocatedLink> {
    let mut links = Vec::new();
    for (line, text) in numbered_lines(content) {
        for caps in INLINE_LINK.captures_iter(text) {
            links.push(LocatedLink {
                line,
                text: caps[1].to_string(),
                target: caps[2].to_string(),
                kind: LinkKind::Inline,
                raw: caps[0].to_string(),
            });
        }
    }
    links
}

/// Lines that, once trimmed, consist of exactly `[name]: value`.
pub fn reference_definitions(content: &str) -> Vec<LocatedLink> {
    numbered_lines(content)
        .filter_map(|(line, text)| {
            let caps = REFERENCE_DEFINITION.captures(text.trim())?;
            Some(LocatedLink {
                line,
                text: caps[1].to_string(),
                target: caps[2].trim().to_string(),
                kind: LinkKind::ReferenceDefinition,
                raw: caps[0].to_string(),
            })
        })
        .collect()
}

/// Every `[aep-N][aep-N]` pair whose two labels are textually identical.
///
/// The `aep-` prefix is matched case-insensitively, but both halves must
/// be spelled the same way.
pub fn self_references(content: &str) -> Vec<LocatedLink> {
    let mut links = Vec::new();
    for (line, text) in numbered_lines(content) {
        let mut pos = 0;
        while let Some(m) = AEP_LABEL.find_at(text, pos) {
            let label = m.as_str();
            if text[m.end()..].starts_with(label) {
                let id = &label[1..label.len() - 1];
                let end = m.end() + label.len();
                links.push(LocatedLink {
                    line,
                    text: id.to_string(),
                    target: id.to_string(),
                    kind: LinkKind::SelfReference,
                    raw: text[m.start()..end].to_string(),
                });
                pos = end;
            } else {
                pos = m.end();
            }
        }
    }
    links
}

/// Lines split on `\n`, numbered from 1.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split('\n').enumerate().map(|(i, l)| (i + 1, l))
}
