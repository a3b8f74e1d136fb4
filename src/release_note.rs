//! Release note assembly

use chrono::NaiveDate;
use semver::Version;
use std::collections::BTreeMap;

use crate::domain::{BreakingChangeSection, CommitEntry, ReleaseNoteSection, SectionTable};

/// Structured summary of one release.
///
/// `version`, `tag` and `date` are independent: a note may carry a tag that
/// is not a version, or no date at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNote {
    pub version: Option<Version>,
    pub tag: String,
    pub date: Option<NaiveDate>,
    pub sections: BTreeMap<String, ReleaseNoteSection>,
    pub breaking_changes: BreakingChangeSection,
}

impl ReleaseNote {
    /// Header-only note
    pub fn empty(version: Option<Version>, tag: impl Into<String>, date: Option<NaiveDate>) -> Self {
        assemble(
            version,
            tag,
            date,
            BTreeMap::new(),
            BreakingChangeSection::new("Breaking Changes", Vec::new()),
        )
    }

    /// Label shown in the heading: `v<version>`, or the raw tag when the
    /// version is absent.
    pub fn release_label(&self) -> String {
        match &self.version {
            Some(version) => format!("v{}", version),
            None => self.tag.clone(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.sections.is_empty() || !self.breaking_changes.is_empty()
    }
}

/// Combine the pieces of a release into a `ReleaseNote`.
///
/// Nothing is validated; breaking messages are kept in input order.
pub fn assemble(
    version: Option<Version>,
    tag: impl Into<String>,
    date: Option<NaiveDate>,
    sections: BTreeMap<String, ReleaseNoteSection>,
    breaking_changes: BreakingChangeSection,
) -> ReleaseNote {
    ReleaseNote {
        version,
        tag: tag.into(),
        date,
        sections,
        breaking_changes,
    }
}

/// Builds release notes from parsed commits with a fixed section table
#[derive(Debug, Clone)]
pub struct ReleaseNoteProcessor {
    table: SectionTable,
}

impl ReleaseNoteProcessor {
    pub fn new(table: SectionTable) -> Self {
        ReleaseNoteProcessor { table }
    }

    pub fn table(&self) -> &SectionTable {
        &self.table
    }

    /// Classify `entries` and collect their breaking changes into a note
    pub fn create(
        &self,
        version: Option<Version>,
        tag: impl Into<String>,
        date: Option<NaiveDate>,
        entries: &[CommitEntry],
    ) -> ReleaseNote {
        assemble(
            version,
            tag,
            date,
            self.table.classify(entries),
            self.table.breaking_changes(entries),
        )
    }
}
