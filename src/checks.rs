//! Link rules and the fixes they propose.
//!
//! Rules, in evaluation order per link:
//! - `md-link`: targets ending in `.md` (outside `https://github.com/`).
//!   Fixed by dropping the extension.
//! - `missing-aep`: `/NNNN` or `./NNNN` targets absent from the catalog.
//!   Report only.
//! - `invalid-http-url`: `http`/`https` URLs without an authority.
//!   Report only.
//! - `aep-reference-definition`: `[aep-N]: ...` definitions. Fixed by
//!   removing the definition.
//! - `self-reference`: `[aep-N][aep-N]` pairs. Fixed by replacing the pair
//!   with the bare `aep-N`.

use crate::catalog::Catalog;
use crate::extract;
use crate::models::{Edit, Fix, Issue, LinkKind, LocatedLink, Rule};
use regex::Regex;
use std::sync::LazyLock;

const GITHUB_PREFIX: &str = "https://github.com/";

static AEP_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.?/([0-9]+)$").unwrap());

static AEP_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^aep-[0-9]+$").unwrap());

// Generic URI prefix: optional scheme, then an optional `//authority`.
static URI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?").unwrap()
});

/// Violations and proposed fixes for one document.
#[derive(Debug, Default)]
pub struct FileReport {
    pub issues: Vec<Issue>,
    pub fixes: Vec<Fix>,
}

impl FileReport {
    fn push_issue(&mut self, file: &str, line: usize, rule: Rule, message: String) {
        self.issues.push(Issue {
            file: file.to_string(),
            line: Some(line),
            rule,
            message,
        });
    }
}

/// Run every rule over `content`.
///
/// `file` is only used to label the issues. Fixes are proposed for every
/// fixable violation; whether they are applied is up to the caller.
pub fn check_content(file: &str, content: &str, catalog: &Catalog) -> FileReport {
    let links = extract::extract(content);
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let original = |line: usize| lines.get(line - 1).copied().unwrap_or_default().to_string();

    let mut report = FileReport::default();
    for link in links.all_links() {
        check_link(file, link, catalog, &original, &mut report);
    }

    for pair in &links.self_references {
        let id = &pair.text;
        report.push_issue(
            file,
            pair.line,
            Rule::SelfReference,
            format!("Self-reference link '{id}' should be converted to naked text"),
        );
        let from = pair.raw.clone();
        report.fixes.push(Fix {
            line_index: pair.line - 1,
            original: original(pair.line),
            description: format!("{from} -> {id}"),
            edit: Edit::Substitute {
                from,
                to: id.clone(),
            },
        });
    }
    report
}

fn check_link(
    file: &str,
    link: &LocatedLink,
    catalog: &Catalog,
    original: &impl Fn(usize) -> String,
    report: &mut FileReport,
) {
    let url = link.target.as_str();
    let text = link.text.as_str();

    if points_to_markdown(url) {
        report.push_issue(
            file,
            link.line,
            Rule::MdLink,
            format!("Link '{text}' points to .md file: {url}"),
        );
        let fixed = &url[..url.len() - 3];
        report.fixes.push(Fix {
            line_index: link.line - 1,
            original: original(link.line),
            description: format!("{url} -> {fixed}"),
            edit: Edit::Substitute {
                from: url.to_string(),
                to: fixed.to_string(),
            },
        });
    }

    if let Some(id) = aep_reference(url) {
        if !catalog.contains(id) {
            report.push_issue(
                file,
                link.line,
                Rule::MissingAep,
                format!("Link '{text}' references non-existent AEP: {url}"),
            );
        }
    }

    if is_http_url(url) && !is_valid_http_url(url) {
        report.push_issue(
            file,
            link.line,
            Rule::InvalidHttpUrl,
            format!("Link '{text}' points to invalid HTTP URL: {url}"),
        );
    }

    if link.kind == LinkKind::ReferenceDefinition && is_aep_identifier(text) {
        report.push_issue(
            file,
            link.line,
            Rule::AepReferenceDefinition,
            format!(
                "Reference-style link '{text}' should be removed - AEP identifiers should not be used as link text"
            ),
        );
        report.fixes.push(Fix {
            line_index: link.line - 1,
            original: original(link.line),
            description: format!("Removing reference-style link {}", link.raw),
            edit: Edit::RemoveDefinition {
                construct: link.raw.clone(),
            },
        });
    }
}

/// Local markdown source targets. GitHub URLs are exempt.
pub fn points_to_markdown(url: &str) -> bool {
    url.ends_with(".md") && !url.starts_with(GITHUB_PREFIX)
}

/// The identifier of a `/NNNN` or `./NNNN` cross-reference.
pub fn aep_reference(url: &str) -> Option<&str> {
    AEP_REFERENCE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Link text of the form `aep-N`, in any case.
pub fn is_aep_identifier(text: &str) -> bool {
    AEP_IDENTIFIER.is_match(text)
}

/// Leading whitespace is ignored, as generic URI splitters do.
fn scheme_and_authority(url: &str) -> (Option<&str>, Option<&str>) {
    match URI_PREFIX.captures(url.trim_start()) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        ),
        None => (None, None),
    }
}

pub fn is_http_url(url: &str) -> bool {
    matches!(
        scheme_and_authority(url).0,
        Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https")
    )
}

/// An `http`/`https` URL carrying a non-empty authority.
pub fn is_valid_http_url(url: &str) -> bool {
    is_http_url(url) && scheme_and_authority(url).1.is_some_and(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        ["0001", "0002"].into_iter().collect()
    }

    fn rules(report: &FileReport) -> Vec<Rule> {
        report.issues.iter().map(|i| i.rule).collect()
    }

    #[test]
    fn test_md_link_reported_and_fixed() {
        let content = "Read [the guide](./guide.md) first.\n";
        let report = check_content("doc.md.j2", content, &catalog());
        assert_eq!(rules(&report), vec![Rule::MdLink]);
        assert_eq!(
            report.issues[0].to_string(),
            "doc.md.j2:1: Link 'the guide' points to .md file: ./guide.md"
        );
        assert_eq!(report.fixes.len(), 1);
        assert_eq!(report.fixes[0].line_index, 0);
        assert_eq!(report.fixes[0].replacement(), "Read [the guide](./guide) first.\n");
    }

    #[test]
    fn test_github_md_links_are_allowed() {
        let content = "[src](https://github.com/aep-dev/aep.dev/blob/main/README.md)";
        let report = check_content("f", content, &catalog());
        assert!(report.issues.is_empty());
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn test_missing_aep_reference_has_no_fix() {
        let content = "[spec](./0005) and [ok](/0001)";
        let report = check_content("f", content, &catalog());
        assert_eq!(rules(&report), vec![Rule::MissingAep]);
        assert_eq!(
            report.issues[0].message,
            "Link 'spec' references non-existent AEP: ./0005"
        );
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn test_aep_reference_shape() {
        assert_eq!(aep_reference("./0005"), Some("0005"));
        assert_eq!(aep_reference("/12"), Some("12"));
        assert_eq!(aep_reference("0005"), None);
        assert_eq!(aep_reference("../0005"), None);
        assert_eq!(aep_reference("./0005#section"), None);
    }

    #[test]
    fn test_invalid_http_url() {
        let report = check_content("f", "[site](http://)", &catalog());
        assert_eq!(rules(&report), vec![Rule::InvalidHttpUrl]);
        assert_eq!(
            report.issues[0].message,
            "Link 'site' points to invalid HTTP URL: http://"
        );
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn test_http_url_shapes() {
        assert!(is_valid_http_url("https://aep.dev/"));
        assert!(is_valid_http_url("HTTP://example.com"));
        assert!(!is_valid_http_url("https:///path"));
        assert!(!is_valid_http_url("http:example.com"));
        assert!(is_http_url("http:example.com"));
        assert!(!is_http_url("./0001"));
        assert!(!is_http_url("mailto:a@b.c"));
        assert!(!is_http_url("//example.com"));
    }

    #[test]
    fn test_leading_whitespace_before_scheme() {
        assert!(is_http_url(" http://"));
        assert!(!is_valid_http_url(" http://"));
        assert!(is_valid_http_url("\thttps://aep.dev"));
        let report = check_content("f", "[x]( http://)", &catalog());
        assert_eq!(rules(&report), vec![Rule::InvalidHttpUrl]);
    }

    #[test]
    fn test_aep_definition_removal_any_separator() {
        for line in ["[aep-9]:   ./0009\n", "[aep-9]:./0009\n", "\t[AEP-9]:\t./0009\n"] {
            let report = check_content("f", line, &catalog());
            assert_eq!(
                rules(&report),
                vec![Rule::MissingAep, Rule::AepReferenceDefinition],
                "{line:?}"
            );
            let replacement = report.fixes[0].replacement();
            assert!(replacement.trim().is_empty(), "{line:?} -> {replacement:?}");
        }
    }

    #[test]
    fn test_self_reference_fix() {
        let content = "See [aep-5][aep-5] for details.\n";
        let report = check_content("f", content, &catalog());
        assert_eq!(rules(&report), vec![Rule::SelfReference]);
        assert_eq!(report.fixes[0].replacement(), "See aep-5 for details.\n");
    }

    #[test]
    fn test_aep_definition_with_md_target_fires_both_rules() {
        let content = "[aep-9]: ./0009.md\n";
        let report = check_content("f", content, &catalog());
        assert_eq!(
            rules(&report),
            vec![Rule::MdLink, Rule::AepReferenceDefinition]
        );
        assert_eq!(report.fixes.len(), 2);
        assert!(report.fixes[1].edit.is_removal());
        assert_eq!(report.fixes[1].replacement(), "");
    }

    #[test]
    fn test_aep_definition_pointing_to_missing_aep() {
        let content = "[AEP-7]: /0007";
        let report = check_content("f", content, &catalog());
        assert_eq!(
            rules(&report),
            vec![Rule::MissingAep, Rule::AepReferenceDefinition]
        );
    }

    #[test]
    fn test_plain_definition_is_not_an_aep_identifier() {
        let content = "[aep.dev]: https://aep.dev/\n[aep-1](./0001)\n";
        let report = check_content("f", content, &catalog());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_clean_document() {
        let content = "# Title\n\nSee [aep-1](./0001) and [docs](https://aep.dev).\n";
        let report = check_content("f", content, &catalog());
        assert!(report.issues.is_empty());
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn test_line_numbers_and_original_lines() {
        let content = "one\ntwo [x](a.md)\nthree\n";
        let report = check_content("f", content, &catalog());
        assert_eq!(report.issues[0].line, Some(2));
        assert_eq!(report.fixes[0].original, "two [x](a.md)\n");
    }
}
