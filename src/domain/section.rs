use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::commit::CommitEntry;
use crate::error::{Result, SvError};

/// One row of the section table: a commit type and its heading.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionDef {
    pub key: String,
    pub name: String,
}

impl SectionDef {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        SectionDef {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Immutable type -> heading table.
///
/// The order of definitions is the order sections are rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTable {
    sections: Vec<SectionDef>,
    breaking_changes_title: String,
}

impl SectionTable {
    /// Build a table, rejecting duplicate or blank keys.
    pub fn new(sections: Vec<SectionDef>, breaking_changes_title: impl Into<String>) -> Result<Self> {
        for (i, def) in sections.iter().enumerate() {
            if def.key.trim().is_empty() || def.name.trim().is_empty() {
                return Err(SvError::config(format!(
                    "section #{} needs both a key and a name",
                    i + 1
                )));
            }
            if sections[..i].iter().any(|other| other.key == def.key) {
                return Err(SvError::config(format!(
                    "section key '{}' is defined more than once",
                    def.key
                )));
            }
        }

        Ok(SectionTable {
            sections,
            breaking_changes_title: breaking_changes_title.into(),
        })
    }

    /// Display name for a commit type, if the type has a section.
    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|def| def.key == key)
            .map(|def| def.name.as_str())
    }

    /// Section keys in render order
    pub fn order(&self) -> Vec<String> {
        self.sections.iter().map(|def| def.key.clone()).collect()
    }

    pub fn breaking_changes_title(&self) -> &str {
        &self.breaking_changes_title
    }

    /// Group entries into sections by type.
    ///
    /// Unknown types are skipped, empty sections are omitted, and entries
    /// keep their input order within a section.
    pub fn classify(&self, entries: &[CommitEntry]) -> BTreeMap<String, ReleaseNoteSection> {
        let mut sections: BTreeMap<String, ReleaseNoteSection> = BTreeMap::new();

        for entry in entries {
            let Some(name) = self.display_name(&entry.r#type) else {
                tracing::trace!(commit_type = %entry.r#type, "type has no section, skipping");
                continue;
            };
            sections
                .entry(entry.r#type.clone())
                .or_insert_with(|| ReleaseNoteSection::new(name, Vec::new()))
                .items
                .push(entry.clone());
        }

        tracing::debug!(sections = sections.len(), "classified commits");
        sections
    }

    /// Collect breaking-change messages in input order.
    pub fn breaking_changes(&self, entries: &[CommitEntry]) -> BreakingChangeSection {
        BreakingChangeSection::new(
            self.breaking_changes_title.clone(),
            entries
                .iter()
                .filter_map(CommitEntry::breaking_change_message)
                .map(str::to_string)
                .collect(),
        )
    }
}

/// A heading plus the commits listed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNoteSection {
    pub name: String,
    pub items: Vec<CommitEntry>,
}

impl ReleaseNoteSection {
    pub fn new(name: impl Into<String>, items: Vec<CommitEntry>) -> Self {
        ReleaseNoteSection {
            name: name.into(),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakingChangeSection {
    pub name: String,
    pub messages: Vec<String>,
}

impl BreakingChangeSection {
    pub fn new(name: impl Into<String>, messages: Vec<String>) -> Self {
        BreakingChangeSection {
            name: name.into(),
            messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
