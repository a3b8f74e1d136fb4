use regex::Regex;
use semver::Version;

use crate::error::{Result, SvError};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
    matcher: Regex,
}

impl TagPattern {
    /// Compile a pattern; it must contain the `{version}` placeholder exactly once.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.matches(PLACEHOLDER).count() != 1 {
            return Err(SvError::config(format!(
                "tag pattern '{}' must contain {} exactly once",
                pattern, PLACEHOLDER
            )));
        }

        let escaped = regex::escape(pattern);
        let regex_pattern = escaped.replace(&regex::escape(PLACEHOLDER), r"(?P<version>\S+)");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| SvError::config(format!("invalid tag pattern '{}': {}", pattern, e)))?;

        Ok(TagPattern {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }

    /// Version carried by a tag that follows this pattern
    pub fn version_of(&self, tag: &str) -> Option<Version> {
        let captures = self.matcher.captures(tag)?;
        Version::parse(&captures["version"]).ok()
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.version_of(tag).is_some()
    }
}
