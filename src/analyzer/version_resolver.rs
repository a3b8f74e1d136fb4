use semver::Version;

use crate::config::VersioningConfig;
use crate::domain::{bump_version, CommitEntry, VersionBump};
use crate::error::{Result, SvError};

/// Resolves the next version from the current one and a set of commits
#[derive(Debug, Clone)]
pub struct VersionResolver {
    minor_types: Vec<String>,
    patch_types: Vec<String>,
    initial_version: Version,
}

impl Default for VersionResolver {
    fn default() -> Self {
        VersionResolver {
            minor_types: vec!["feat".to_string()],
            patch_types: vec!["fix".to_string(), "perf".to_string(), "refactor".to_string()],
            initial_version: Version::new(0, 0, 0),
        }
    }
}

impl VersionResolver {
    /// Create a resolver from configuration
    pub fn new(config: &VersioningConfig) -> Result<Self> {
        Ok(VersionResolver {
            minor_types: config.minor_types.clone(),
            patch_types: config.patch_types.clone(),
            initial_version: config.initial_version()?,
        })
    }

    /// Use `version` instead of the configured seed when there is no prior version
    pub fn with_initial_version(mut self, version: Version) -> Self {
        self.initial_version = version;
        self
    }

    pub fn initial_version(&self) -> &Version {
        &self.initial_version
    }

    /// Bump requested by a single commit
    pub fn bump_for(&self, entry: &CommitEntry) -> VersionBump {
        if entry.is_breaking_change {
            VersionBump::Major
        } else if self.minor_types.contains(&entry.r#type) {
            VersionBump::Minor
        } else if self.patch_types.contains(&entry.r#type) {
            VersionBump::Patch
        } else {
            VersionBump::None
        }
    }

    /// Highest bump requested by any commit; independent of commit order
    pub fn analyze(&self, entries: &[CommitEntry]) -> VersionBump {
        entries
            .iter()
            .map(|entry| self.bump_for(entry))
            .max()
            .unwrap_or_default()
    }

    /// Bump actually applied to `current`.
    ///
    /// While major is 0 a breaking change only bumps minor.
    pub fn effective_bump(&self, current: &Version, bump: VersionBump) -> VersionBump {
        if bump == VersionBump::Major && current.major == 0 {
            VersionBump::Minor
        } else {
            bump
        }
    }

    /// Bump applied when releasing from `current` (or the seed when absent)
    pub fn applied_bump(&self, current: Option<&Version>, entries: &[CommitEntry]) -> VersionBump {
        let seed = current.unwrap_or(&self.initial_version);
        self.effective_bump(seed, self.analyze(entries))
    }

    /// Compute the next version.
    ///
    /// An absent `current` is seeded from the initial version. When no
    /// commit is release-worthy the seed is returned unchanged. Fails when
    /// the bumped component does not fit in a `u64`.
    pub fn resolve(&self, current: Option<&Version>, entries: &[CommitEntry]) -> Result<Version> {
        let seed = current.unwrap_or(&self.initial_version);
        let requested = self.analyze(entries);
        let bump = self.effective_bump(seed, requested);
        let next = bump_version(seed, bump)
            .ok_or_else(|| SvError::version(format!("cannot apply a {} bump to {}", bump, seed)))?;

        tracing::debug!(
            current = %seed,
            %requested,
            applied = %bump,
            next = %next,
            commits = entries.len(),
            "resolved next version"
        );
        Ok(next)
    }
}
