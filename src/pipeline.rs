//! Release pipeline: parse -> classify -> resolve -> assemble
//!
//! Each tag range is handled independently; nothing here touches git or
//! the filesystem. Callers supply raw commit messages, newest first.

use chrono::NaiveDate;
use semver::Version;
use tracing::instrument;

use crate::analyzer::VersionResolver;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{parse_version_from_tag, CommitParser, TagPattern, VersionBump};
use crate::error::Result;
use crate::release_note::{ReleaseNote, ReleaseNoteProcessor};

/// Input for computing the next release
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseRequest {
    /// Latest existing tag, if any
    pub current_tag: Option<String>,
    /// Tag to title the note with instead of the computed next tag
    pub tag: Option<String>,
    pub date: Option<NaiveDate>,
    /// Raw commit messages since `current_tag`
    pub messages: Vec<String>,
}

/// Result of a release computation
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub current_version: Option<Version>,
    /// Bump applied to reach `next_version`
    pub bump: VersionBump,
    pub next_version: Version,
    pub next_tag: String,
    pub note: ReleaseNote,
    pub warnings: Vec<BoundaryWarning>,
}

/// An existing release: its tag, date, and the commits it contains
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseRange {
    pub tag: String,
    pub date: Option<NaiveDate>,
    pub messages: Vec<String>,
}

/// Split raw `git log` output into messages.
///
/// NUL-separated input (`--format=%B%x00`) keeps multi-line messages whole;
/// otherwise every non-blank line is one subject.
pub fn split_messages(input: &str) -> Vec<String> {
    let parts: Box<dyn Iterator<Item = &str>> = if input.contains('\0') {
        Box::new(input.split('\0'))
    } else {
        Box::new(input.lines())
    };
    parts
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Composes parser, resolver and note processor from one configuration
#[derive(Debug, Clone)]
pub struct ReleasePipeline {
    parser: CommitParser,
    resolver: VersionResolver,
    processor: ReleaseNoteProcessor,
    tag_pattern: TagPattern,
}

impl ReleasePipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ReleasePipeline {
            parser: CommitParser::from_config(&config.commit_message),
            resolver: VersionResolver::new(&config.versioning)?,
            processor: ReleaseNoteProcessor::new(config.section_table()?),
            tag_pattern: config.tag_pattern()?,
        })
    }

    pub fn processor(&self) -> &ReleaseNoteProcessor {
        &self.processor
    }

    /// Version carried by a tag, trying the configured pattern first
    pub fn version_of(&self, tag: &str) -> Option<Version> {
        self.tag_pattern
            .version_of(tag)
            .or_else(|| parse_version_from_tag(tag))
    }

    /// Compute the next version, next tag, and release note.
    ///
    /// Fails only when the next version cannot be represented.
    #[instrument(skip(self, request), fields(current_tag = ?request.current_tag, commits = request.messages.len()))]
    pub fn next_release(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let mut warnings = Vec::new();

        if request.messages.is_empty() {
            warnings.push(BoundaryWarning::NoCommits);
        }

        let batch = self.parser.parse_all(&request.messages);
        if let Some(first) = batch.rejected.first() {
            warnings.push(BoundaryWarning::NonConventionalCommits {
                count: batch.rejected.len(),
                first: first.clone(),
            });
        }

        let current_version = match request.current_tag.as_deref() {
            Some(tag) => {
                let version = self.version_of(tag);
                if version.is_none() {
                    warnings.push(BoundaryWarning::UnparsableTag {
                        tag: tag.to_string(),
                        fallback: self.resolver.initial_version().to_string(),
                    });
                }
                version
            }
            None => None,
        };

        let bump = self
            .resolver
            .applied_bump(current_version.as_ref(), &batch.entries);
        let next_version = self
            .resolver
            .resolve(current_version.as_ref(), &batch.entries)?;
        if !bump.is_release() && !batch.entries.is_empty() {
            warnings.push(BoundaryWarning::NoReleaseWorthyCommits {
                version: next_version.to_string(),
            });
        }
        let next_tag = self.tag_pattern.format(&next_version);

        let (note_version, note_tag) = match &request.tag {
            Some(tag) => (self.version_of(tag), tag.clone()),
            None => (Some(next_version.clone()), next_tag.clone()),
        };
        let note = self
            .processor
            .create(note_version, note_tag, request.date, &batch.entries);

        for warning in &warnings {
            tracing::debug!(%warning, "release warning");
        }

        Ok(ReleaseOutcome {
            current_version,
            bump,
            next_version,
            next_tag,
            note,
            warnings,
        })
    }

    /// Release notes for existing releases, one per range, in input order.
    ///
    /// Library entry point for rebuilding a full changelog; pair it with
    /// `OutputFormatter::format_changelog`. The binary only renders the
    /// upcoming release.
    ///
    /// Non-conventional commits are dropped; unparseable tags keep an
    /// absent version and show the literal tag.
    #[instrument(skip(self, ranges), fields(releases = ranges.len()))]
    pub fn history(&self, ranges: &[ReleaseRange]) -> Vec<ReleaseNote> {
        ranges
            .iter()
            .map(|range| {
                let batch = self.parser.parse_all(&range.messages);
                self.processor.create(
                    self.version_of(&range.tag),
                    range.tag.clone(),
                    range.date,
                    &batch.entries,
                )
            })
            .collect()
    }
}
