//! Immutable semantic version value type

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;

use crate::comparator;
use crate::differ::{self, VersionDiff};
use crate::parser::{self, ParseError};
use crate::range::{RangeError, RangesList};

lazy_static! {
    /// The canonical lowest release version, `0.0.0`.
    pub static ref ZERO: Semver = Semver::new(0, 0, 0);
}

/// A parsed semantic version.
///
/// Instances are immutable; every deriving operation (`next_major`,
/// `with_build`, ...) returns a fresh value. Precedence comparisons ignore
/// build metadata, while [`Semver::is_equal_to`] (and `==`) compare the
/// original source text verbatim.
#[derive(Debug, Clone)]
pub struct Semver {
    major: u32,
    minor: u32,
    patch: u32,
    pre_release: Vec<String>,
    build: Vec<String>,
    original: String,
    version: String,
}

impl Semver {
    /// Parse a version string against the strict grammar
    /// `major.minor.patch[-pre][+build]`.
    ///
    /// Leading and trailing whitespace is trimmed before parsing.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let parts = parser::parse_components(trimmed)?;

        let mut version = format!("{}.{}.{}", parts.major, parts.minor, parts.patch);
        if !parts.pre_release.is_empty() {
            version.push('-');
            version.push_str(&parts.pre_release.join("."));
        }
        if !parts.build.is_empty() {
            version.push('+');
            version.push_str(&parts.build.join("."));
        }

        Ok(Semver {
            major: parts.major,
            minor: parts.minor,
            patch: parts.patch,
            pre_release: parts.pre_release,
            build: parts.build,
            original: trimmed.to_string(),
            version,
        })
    }

    /// Check whether a string is a valid strict semantic version.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Build a release version from a numeric triple.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        let version = format!("{major}.{minor}.{patch}");
        Semver {
            major,
            minor,
            patch,
            pre_release: Vec::new(),
            build: Vec::new(),
            original: version.clone(),
            version,
        }
    }

    /// The major component.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// The minor component.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// The patch component.
    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Pre-release identifiers, in source order. Empty for a release version.
    pub fn pre_release(&self) -> &[String] {
        &self.pre_release
    }

    /// Build identifiers, in source order. Never participate in precedence.
    pub fn build(&self) -> &[String] {
        &self.build
    }

    /// The canonical rendering, `major.minor.patch[-pre][+build]`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The trimmed source text this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// A version is stable when its major is strictly positive and it carries
    /// no pre-release identifiers.
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.pre_release.is_empty()
    }

    /// Precedence comparison, build metadata excluded.
    pub fn compare_to(&self, other: &Semver) -> Ordering {
        comparator::compare(self, other)
    }

    /// `self > other` by precedence.
    pub fn is_greater_than(&self, other: &Semver) -> bool {
        self.compare_to(other) == Ordering::Greater
    }

    /// `self >= other` by precedence.
    pub fn is_greater_than_or_equal_to(&self, other: &Semver) -> bool {
        self.compare_to(other) != Ordering::Less
    }

    /// `self < other` by precedence.
    pub fn is_lower_than(&self, other: &Semver) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    /// `self <= other` by precedence.
    pub fn is_lower_than_or_equal_to(&self, other: &Semver) -> bool {
        self.compare_to(other) != Ordering::Greater
    }

    /// Exact equality: the original source text must match verbatim.
    pub fn is_equal_to(&self, other: &Semver) -> bool {
        self == other
    }

    /// Precedence equality: build metadata and source spelling are ignored.
    pub fn is_equivalent_to(&self, other: &Semver) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    /// The highest-precedence field in which the two versions differ.
    pub fn diff(&self, other: &Semver) -> VersionDiff {
        differ::diff(self, other)
    }

    /// Check this version against a range expression.
    pub fn satisfies(&self, range: &str) -> Result<bool, RangeError> {
        let ranges = RangesList::parse(range)?;
        Ok(self.satisfies_ranges(&ranges))
    }

    /// Check this version against a pre-built [`RangesList`].
    pub fn satisfies_ranges(&self, ranges: &RangesList) -> bool {
        ranges.is_satisfied_by(self)
    }
}

impl PartialEq for Semver {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for Semver {}

impl Hash for Semver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let version = Semver::parse("1.2.3-beta.4+sha98450956").unwrap();
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.pre_release(), &["beta", "4"]);
        assert_eq!(version.build(), &["sha98450956"]);
        assert_eq!(version.version(), "1.2.3-beta.4+sha98450956");
    }

    #[test]
    fn test_display_is_canonical() {
        let version = Semver::parse("  1.2.3-alpha+001  ").unwrap();
        assert_eq!(version.to_string(), "1.2.3-alpha+001");
        assert_eq!(version.original(), "1.2.3-alpha+001");
    }

    #[test]
    fn test_exact_equality_is_source_sensitive() {
        let a = Semver::parse("1.2.3+build.1").unwrap();
        let b = Semver::parse("1.2.3+build.2").unwrap();
        assert!(!a.is_equal_to(&b));
        assert!(a.is_equivalent_to(&b));
        assert!(a.is_equal_to(&Semver::parse("1.2.3+build.1").unwrap()));
    }

    #[test]
    fn test_predicates_delegate_to_one_comparator() {
        let low = Semver::parse("1.2.3").unwrap();
        let high = Semver::parse("1.3.0").unwrap();
        assert!(high.is_greater_than(&low));
        assert!(high.is_greater_than_or_equal_to(&low));
        assert!(low.is_lower_than(&high));
        assert!(low.is_lower_than_or_equal_to(&high));
        assert_eq!(high.is_greater_than(&low), !high.is_lower_than_or_equal_to(&low));
    }

    #[test]
    fn test_is_stable() {
        assert!(Semver::parse("1.0.0").unwrap().is_stable());
        assert!(Semver::parse("1.0.0+build").unwrap().is_stable());
        assert!(!Semver::parse("0.9.0").unwrap().is_stable());
        assert!(!Semver::parse("1.0.0-rc.1").unwrap().is_stable());
    }

    #[test]
    fn test_zero_constant() {
        assert_eq!(ZERO.version(), "0.0.0");
        assert!(!ZERO.is_stable());
    }
}
