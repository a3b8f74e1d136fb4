use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{SectionDef, SectionTable, TagPattern};
use crate::error::{Result, SvError};

/// Represents the complete configuration for git-sv.
///
/// Every table is optional; missing tables fall back to their `Default` impls.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub release_notes: ReleaseNotesConfig,

    #[serde(default)]
    pub commit_message: CommitMessageConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub tag: TagConfig,
}

/// Returns the default section list, in display order.
fn default_sections() -> Vec<SectionDef> {
    [
        ("feat", "Features"),
        ("fix", "Bug Fixes"),
        ("refactor", "Code Refactoring"),
        ("perf", "Performance Improvements"),
        ("test", "Tests"),
        ("build", "Build"),
        ("ci", "Continuous Integration"),
        ("chore", "Chores"),
        ("docs", "Documentation"),
        ("style", "Styles"),
    ]
    .into_iter()
    .map(|(key, name)| SectionDef::new(key, name))
    .collect()
}

fn default_breaking_changes_title() -> String {
    "Breaking Changes".to_string()
}

/// Configuration for release note layout.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseNotesConfig {
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionDef>,

    #[serde(default = "default_breaking_changes_title")]
    pub breaking_changes_title: String,
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        ReleaseNotesConfig {
            sections: default_sections(),
            breaking_changes_title: default_breaking_changes_title(),
        }
    }
}

/// Returns the default list of breaking change footer tokens.
fn default_breaking_change_markers() -> Vec<String> {
    vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()]
}

/// Configuration for commit message parsing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitMessageConfig {
    #[serde(default = "default_breaking_change_markers")]
    pub breaking_change_markers: Vec<String>,
}

impl Default for CommitMessageConfig {
    fn default() -> Self {
        CommitMessageConfig {
            breaking_change_markers: default_breaking_change_markers(),
        }
    }
}

fn default_initial_version() -> String {
    "0.0.0".to_string()
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string(), "perf".to_string(), "refactor".to_string()]
}

/// Configuration for version resolution.
///
/// `initial_version` seeds resolution when no prior tag parses as a version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            initial_version: default_initial_version(),
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
        }
    }
}

impl VersioningConfig {
    /// Parse `initial_version`, accepting an optional `v` prefix.
    pub fn initial_version(&self) -> Result<semver::Version> {
        crate::domain::parse_version_from_tag(&self.initial_version).ok_or_else(|| {
            SvError::config(format!(
                "initial_version '{}' is not a semantic version",
                self.initial_version
            ))
        })
    }
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// Configuration for tag naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
        }
    }
}

impl Config {
    /// Build the immutable section table handed to the classifier and projector.
    pub fn section_table(&self) -> Result<SectionTable> {
        SectionTable::new(
            self.release_notes.sections.clone(),
            self.release_notes.breaking_changes_title.clone(),
        )
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::parse(&self.tag.pattern)
    }

    /// Check everything that would otherwise fail later in the pipeline.
    pub fn validate(&self) -> Result<()> {
        self.section_table()?;
        self.tag_pattern()?;
        self.versioning.initial_version()?;
        if self.commit_message.breaking_change_markers.is_empty() {
            return Err(SvError::config(
                "commit_message.breaking_change_markers must not be empty",
            ));
        }
        Ok(())
    }
}

/// Candidate configuration files, in lookup order.
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("./.sv.toml"), PathBuf::from("./sv.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("git-sv").join("config.toml"));
    }
    paths
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.sv.toml` then `sv.toml` in the current directory
/// 3. `git-sv/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// A configuration that loads but does not validate is an error.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_paths().into_iter().find(|p| p.exists()),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let config_str = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&config_str)?
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section_order() {
        let config = Config::default();
        let keys: Vec<&str> = config
            .release_notes
            .sections
            .iter()
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["feat", "fix", "refactor", "perf", "test", "build", "ci", "chore", "docs", "style"]
        );
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[versioning]
patch_types = ["fix"]
"#,
        )
        .unwrap();
        assert_eq!(config.versioning.patch_types, vec!["fix".to_string()]);
        assert_eq!(config.versioning.minor_types, vec!["feat".to_string()]);
        assert_eq!(config.versioning.initial_version, "0.0.0");
        assert_eq!(config.tag.pattern, "v{version}");
    }

    #[test]
    fn test_invalid_initial_version_rejected() {
        let mut config = Config::default();
        config.versioning.initial_version = "first".to_string();
        assert!(matches!(config.validate(), Err(SvError::Config(_))));
    }

    #[test]
    fn test_initial_version_accepts_prefix() {
        let mut config = Config::default();
        config.versioning.initial_version = "v0.1.0".to_string();
        assert_eq!(
            config.versioning.initial_version().unwrap(),
            semver::Version::new(0, 1, 0)
        );
    }

    #[test]
    fn test_empty_markers_rejected() {
        let mut config = Config::default();
        config.commit_message.breaking_change_markers.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pattern_without_placeholder_rejected() {
        let mut config = Config::default();
        config.tag.pattern = "release".to_string();
        assert!(config.validate().is_err());
    }
}
