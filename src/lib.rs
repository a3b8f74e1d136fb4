//! Next-version and release-note engine for conventional commits.
//!
//! Raw commit messages are parsed into [`domain::CommitEntry`] values,
//! grouped into sections by a [`domain::SectionTable`], used to resolve the
//! next semantic version, and assembled into a [`release_note::ReleaseNote`]
//! that [`template::OutputFormatter`] renders.

pub mod analyzer;
pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod release_note;
pub mod template;
pub mod ui;

pub use error::{Result, SvError};
