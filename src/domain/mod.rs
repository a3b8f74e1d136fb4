//! Domain logic - pure rules over commit messages, sections and versions

pub mod commit;
pub mod section;
pub mod tag;
pub mod version;

pub use commit::{CommitEntry, CommitParser, Footer, ParsedBatch};
pub use section::{BreakingChangeSection, ReleaseNoteSection, SectionDef, SectionTable};
pub use tag::TagPattern;
pub use version::{bump_version, parse_version_from_tag, VersionBump};
