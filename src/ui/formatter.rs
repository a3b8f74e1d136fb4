//! Pure formatting functions for terminal output.
//!
//! Status lines go to stderr so stdout stays clean for rendered documents.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line summary of a version change, e.g. `1.2.3 -> 1.3.0 (minor)`.
pub fn version_change_line(current: Option<&str>, next: &str, bump: &str) -> String {
    match current {
        Some(current) => format!("{} -> {} ({})", current, next, bump),
        None => format!("initial -> {} ({})", next, bump),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_change_line() {
        assert_eq!(
            version_change_line(Some("1.2.3"), "1.3.0", "minor"),
            "1.2.3 -> 1.3.0 (minor)"
        );
        assert_eq!(
            version_change_line(None, "0.0.1", "patch"),
            "initial -> 0.0.1 (patch)"
        );
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::NoCommits);
    }
}
