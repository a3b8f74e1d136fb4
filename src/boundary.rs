use std::fmt;

/// Non-fatal conditions met while turning commits into a release.
/// The pipeline absorbs them; callers decide whether to show them.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Commits whose first line is not a conventional header
    NonConventionalCommits { count: usize, first: String },
    /// Prior tag cannot be parsed as a semantic version
    UnparsableTag { tag: String, fallback: String },
    /// No commit asks for a release
    NoReleaseWorthyCommits { version: String },
    /// The commit range is empty
    NoCommits,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NonConventionalCommits { count, first } => {
                let first_line = first.lines().next().unwrap_or_default();
                let short = match first_line.char_indices().nth(50) {
                    Some((idx, _)) => &first_line[..idx],
                    None => first_line,
                };
                write!(
                    f,
                    "{} commit(s) are not conventional and were left out (first: '{}')",
                    count, short
                )
            }
            BoundaryWarning::UnparsableTag { tag, fallback } => {
                write!(
                    f,
                    "Cannot parse tag '{}' as a version, starting from {}",
                    tag, fallback
                )
            }
            BoundaryWarning::NoReleaseWorthyCommits { version } => {
                write!(f, "No release-worthy commits, version stays at {}", version)
            }
            BoundaryWarning::NoCommits => write!(f, "No commits in range"),
        }
    }
}
