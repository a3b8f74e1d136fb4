use semver::{BuildMetadata, Prerelease, Version};

/// Version bump decision, ordered by precedence.
///
/// `None < Patch < Minor < Major`, so the bump for a set of commits is the
/// maximum of the per-commit bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn is_release(self) -> bool {
        self != VersionBump::None
    }
}

impl std::fmt::Display for VersionBump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        };
        f.write_str(name)
    }
}

/// Parse a version from a tag string (e.g., "v1.2.3" -> 1.2.3).
///
/// An optional `v`/`V` prefix is accepted; anything else must be a full
/// semantic version. Returns `None` for tags such as "abc" or "1.2".
pub fn parse_version_from_tag(tag: &str) -> Option<Version> {
    let tag = tag.trim();
    let clean_tag = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);
    Version::parse(clean_tag).ok()
}

/// Bump a version according to the bump type.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1, or just drop the pre-release of a pre-release version
/// - **None**: unchanged
///
/// Pre-release and build metadata are cleared by every real bump. Returns
/// `None` when the bumped component would overflow.
pub fn bump_version(version: &Version, bump: VersionBump) -> Option<Version> {
    let mut next = version.clone();
    match bump {
        VersionBump::None => return Some(next),
        VersionBump::Major => {
            next.major = next.major.checked_add(1)?;
            next.minor = 0;
            next.patch = 0;
        }
        VersionBump::Minor => {
            next.minor = next.minor.checked_add(1)?;
            next.patch = 0;
        }
        VersionBump::Patch => {
            if version.pre.is_empty() {
                next.patch = next.patch.checked_add(1)?;
            }
        }
    }
    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;
    Some(next)
}
