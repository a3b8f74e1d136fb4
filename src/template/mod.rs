//! Template data projection and rendering
//!
//! - `project` / `project_many` flatten release notes into [`TemplateVars`]
//! - [`Renderer`] is the seam to a template engine
//! - [`MarkdownRenderer`] is the built-in engine
//! - [`OutputFormatter`] ties a renderer to a section table

mod markdown;
mod output;

pub use markdown::MarkdownRenderer;
pub use output::OutputFormatter;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{BreakingChangeSection, ReleaseNoteSection, SectionTable};
use crate::error::Result;
use crate::release_note::ReleaseNote;

/// Template rendering a single release note
pub const RELEASE_NOTES_TEMPLATE: &str = "releasenotes-md.tpl";
/// Template rendering a list of release notes
pub const CHANGELOG_TEMPLATE: &str = "changelog-md.tpl";

/// Flat variables consumed by templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateVars {
    /// `v<version>` or the raw tag
    pub release: String,
    /// `YYYY-MM-DD`, empty when undated
    pub date: String,
    pub sections: BTreeMap<String, ReleaseNoteSection>,
    /// Section keys in render order
    pub order: Vec<String>,
    pub breaking_changes: BreakingChangeSection,
}

impl TemplateVars {
    /// Sections in render order, skipping keys with no section
    pub fn ordered_sections(&self) -> impl Iterator<Item = &ReleaseNoteSection> {
        self.order.iter().filter_map(|key| self.sections.get(key))
    }
}

/// Data handed to a template
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum TemplateData<'a> {
    ReleaseNote(&'a TemplateVars),
    Changelog(&'a [TemplateVars]),
}

/// A template engine
pub trait Renderer: Send + Sync {
    /// Names of the templates this renderer can execute
    fn templates(&self) -> Vec<&str>;

    /// Execute the named template
    fn render(&self, template: &str, data: TemplateData<'_>) -> Result<String>;
}

/// Flatten one note into template variables.
pub fn project(note: &ReleaseNote, table: &SectionTable) -> TemplateVars {
    TemplateVars {
        release: note.release_label(),
        date: note
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        sections: note.sections.clone(),
        order: table.order(),
        breaking_changes: note.breaking_changes.clone(),
    }
}

/// Flatten several notes, keeping their order.
pub fn project_many(notes: &[ReleaseNote], table: &SectionTable) -> Vec<TemplateVars> {
    notes.iter().map(|note| project(note, table)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::CommitEntry;
    use crate::release_note::ReleaseNoteProcessor;
    use chrono::NaiveDate;
    use semver::Version;

    fn table() -> SectionTable {
        Config::default().section_table().unwrap()
    }

    #[test]
    fn test_project_formats_date_and_label() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 1);
        let note = ReleaseNote::empty(Some(Version::new(1, 0, 0)), "v1.0.0", date);
        let vars = project(&note, &table());
        assert_eq!(vars.release, "v1.0.0");
        assert_eq!(vars.date, "2020-05-01");
        assert_eq!(vars.order.first().map(String::as_str), Some("feat"));
    }

    #[test]
    fn test_project_undated_has_empty_date() {
        let note = ReleaseNote::empty(None, "abc", None);
        let vars = project(&note, &table());
        assert_eq!(vars.release, "abc");
        assert_eq!(vars.date, "");
    }

    #[test]
    fn test_ordered_sections_follow_table() {
        let entries = vec![
            CommitEntry::new("build", None, "b"),
            CommitEntry::new("fix", None, "f"),
            CommitEntry::new("feat", None, "a"),
        ];
        let note = ReleaseNoteProcessor::new(table()).create(None, "", None, &entries);
        let vars = project(&note, &table());
        let names: Vec<&str> = vars.ordered_sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Features", "Bug Fixes", "Build"]);
    }

    #[test]
    fn test_project_many_keeps_order() {
        let notes = vec![
            ReleaseNote::empty(Some(Version::new(1, 0, 1)), "v1.0.1", None),
            ReleaseNote::empty(Some(Version::new(1, 0, 0)), "v1.0.0", None),
        ];
        let releases: Vec<String> = project_many(&notes, &table())
            .into_iter()
            .map(|v| v.release)
            .collect();
        assert_eq!(releases, vec!["v1.0.1".to_string(), "v1.0.0".to_string()]);
    }

    #[test]
    fn test_vars_serialize_to_json() {
        let note = ReleaseNote::empty(Some(Version::new(1, 0, 0)), "v1.0.0", None);
        let vars = project(&note, &table());
        let json = serde_json::to_value(TemplateData::ReleaseNote(&vars)).unwrap();
        assert_eq!(json["release"], "v1.0.0");
        assert_eq!(json["breaking_changes"]["name"], "Breaking Changes");
    }
}
