//! Built-in Markdown renderer

use tracing::{debug, instrument};

use super::{Renderer, TemplateData, TemplateVars, CHANGELOG_TEMPLATE, RELEASE_NOTES_TEMPLATE};
use crate::domain::CommitEntry;
use crate::error::{Result, SvError};

/// Markdown renderer serving the release-notes and changelog templates
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer
    }

    fn heading(vars: &TemplateVars) -> String {
        match (vars.release.is_empty(), vars.date.is_empty()) {
            (false, false) => format!("## {} ({})", vars.release, vars.date),
            (false, true) => format!("## {}", vars.release),
            (true, false) => format!("## {}", vars.date),
            (true, true) => "##".to_string(),
        }
    }

    fn item(entry: &CommitEntry) -> String {
        let scope = entry
            .scope
            .as_deref()
            .map(|s| format!("**{}:** ", s))
            .unwrap_or_default();
        format!("- {}{} ({})\n", scope, entry.subject, entry.reference)
    }

    fn release_note(vars: &TemplateVars) -> String {
        let mut output = String::new();
        output.push_str(&Self::heading(vars));
        output.push('\n');

        for section in vars.ordered_sections() {
            output.push_str(&format!("\n### {}\n\n", section.name));
            for entry in &section.items {
                output.push_str(&Self::item(entry));
            }
        }

        if !vars.breaking_changes.is_empty() {
            output.push_str(&format!("\n### {}\n\n", vars.breaking_changes.name));
            for message in &vars.breaking_changes.messages {
                output.push_str(&format!("- {}\n", message.replace('\n', "\n  ")));
            }
        }

        output
    }

    fn changelog(releases: &[TemplateVars]) -> String {
        let mut output = String::from("# Changelog\n");
        for vars in releases {
            output.push('\n');
            output.push_str(&Self::release_note(vars));
            output.push_str("\n---\n");
        }
        output
    }
}

impl Renderer for MarkdownRenderer {
    fn templates(&self) -> Vec<&str> {
        vec![RELEASE_NOTES_TEMPLATE, CHANGELOG_TEMPLATE]
    }

    #[instrument(skip(self, data))]
    fn render(&self, template: &str, data: TemplateData<'_>) -> Result<String> {
        let output = match (template, data) {
            (RELEASE_NOTES_TEMPLATE, TemplateData::ReleaseNote(vars)) => Self::release_note(vars),
            (CHANGELOG_TEMPLATE, TemplateData::Changelog(releases)) => Self::changelog(releases),
            (RELEASE_NOTES_TEMPLATE, _) => {
                return Err(SvError::template(format!(
                    "{} expects a single release note",
                    template
                )))
            }
            (CHANGELOG_TEMPLATE, _) => {
                return Err(SvError::template(format!(
                    "{} expects a list of release notes",
                    template
                )))
            }
            _ => return Err(SvError::template_not_found(template)),
        };

        debug!(output_len = output.len(), "markdown rendered");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BreakingChangeSection, ReleaseNoteSection};
    use std::collections::BTreeMap;

    fn vars(release: &str, date: &str) -> TemplateVars {
        TemplateVars {
            release: release.to_string(),
            date: date.to_string(),
            sections: BTreeMap::new(),
            order: vec!["feat".to_string(), "fix".to_string()],
            breaking_changes: BreakingChangeSection::new("Breaking Changes", Vec::new()),
        }
    }

    #[test]
    fn test_heading_forms() {
        assert_eq!(MarkdownRenderer::heading(&vars("v1.0.0", "2020-05-01")), "## v1.0.0 (2020-05-01)");
        assert_eq!(MarkdownRenderer::heading(&vars("v1.0.0", "")), "## v1.0.0");
        assert_eq!(MarkdownRenderer::heading(&vars("", "2020-05-01")), "## 2020-05-01");
        assert_eq!(MarkdownRenderer::heading(&vars("", "")), "##");
    }

    #[test]
    fn test_item_with_scope_and_reference() {
        let entry = CommitEntry::new("fix", Some("db"), "close pool").with_reference("a1b2c3d");
        assert_eq!(MarkdownRenderer::item(&entry), "- **db:** close pool (a1b2c3d)\n");
    }

    #[test]
    fn test_multiline_breaking_message_is_indented() {
        let mut v = vars("v2.0.0", "");
        v.breaking_changes.messages.push("first\nsecond".to_string());
        let output = MarkdownRenderer::release_note(&v);
        assert!(output.ends_with("### Breaking Changes\n\n- first\n  second\n"));
    }

    #[test]
    fn test_sections_missing_from_order_are_not_rendered() {
        let mut v = vars("v1.0.0", "");
        v.sections.insert(
            "wip".to_string(),
            ReleaseNoteSection::new("WIP", vec![CommitEntry::new("wip", None, "x")]),
        );
        assert_eq!(MarkdownRenderer::release_note(&v), "## v1.0.0\n");
    }

    #[test]
    fn test_unknown_template() {
        let v = vars("v1.0.0", "");
        let err = MarkdownRenderer::new()
            .render("missing.tpl", TemplateData::ReleaseNote(&v))
            .unwrap_err();
        assert!(matches!(err, SvError::TemplateNotFound(_)));
    }

    #[test]
    fn test_data_mismatch_is_an_error() {
        let v = vars("v1.0.0", "");
        let renderer = MarkdownRenderer::new();
        assert!(matches!(
            renderer.render(CHANGELOG_TEMPLATE, TemplateData::ReleaseNote(&v)),
            Err(SvError::Template(_))
        ));
        assert!(matches!(
            renderer.render(RELEASE_NOTES_TEMPLATE, TemplateData::Changelog(std::slice::from_ref(&v))),
            Err(SvError::Template(_))
        ));
    }

    #[test]
    fn test_changelog_layout() {
        let releases = vec![vars("v1.0.1", "2020-05-02"), vars("v1.0.0", "2020-05-01")];
        let output = MarkdownRenderer::new()
            .render(CHANGELOG_TEMPLATE, TemplateData::Changelog(&releases))
            .unwrap();
        assert_eq!(
            output,
            "# Changelog\n\n## v1.0.1 (2020-05-02)\n\n---\n\n## v1.0.0 (2020-05-01)\n\n---\n"
        );
    }

    #[test]
    fn test_empty_changelog() {
        let output = MarkdownRenderer::new()
            .render(CHANGELOG_TEMPLATE, TemplateData::Changelog(&[]))
            .unwrap();
        assert_eq!(output, "# Changelog\n");
    }
}
