//! Analysis engine for determining the next version from commits

pub mod version_resolver;

pub use version_resolver::VersionResolver;
