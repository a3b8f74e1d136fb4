//! Terminal output for the git-sv binary.

pub mod formatter;

pub use formatter::{display_boundary_warning, display_error, display_status, version_change_line};
