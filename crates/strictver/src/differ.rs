//! Greatest-difference classification between two versions

use std::fmt;

use crate::Semver;

/// The highest-precedence field in which two versions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionDiff {
    None,
    Major,
    Minor,
    Patch,
    PreRelease,
    Build,
}

impl VersionDiff {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionDiff::None => "none",
            VersionDiff::Major => "major",
            VersionDiff::Minor => "minor",
            VersionDiff::Patch => "patch",
            VersionDiff::PreRelease => "pre-release",
            VersionDiff::Build => "build",
        }
    }
}

impl fmt::Display for VersionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields are checked major first, so the result is the greatest difference.
pub(crate) fn diff(a: &Semver, b: &Semver) -> VersionDiff {
    if a.major() != b.major() {
        return VersionDiff::Major;
    }
    if a.minor() != b.minor() {
        return VersionDiff::Minor;
    }
    if a.patch() != b.patch() {
        return VersionDiff::Patch;
    }
    if a.pre_release() != b.pre_release() {
        return VersionDiff::PreRelease;
    }
    if a.build() != b.build() {
        return VersionDiff::Build;
    }
    VersionDiff::None
}
