//! Normalized interval form of a range constraint

use std::cmp::Ordering;
use std::fmt;

use crate::Semver;

/// One endpoint of a version interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    version: Semver,
    inclusive: bool,
}

impl Bound {
    pub fn new(version: Semver, inclusive: bool) -> Self {
        Bound { version, inclusive }
    }

    pub fn inclusive(version: Semver) -> Self {
        Self::new(version, true)
    }

    pub fn exclusive(version: Semver) -> Self {
        Self::new(version, false)
    }

    /// The endpoint version.
    pub fn version(&self) -> &Semver {
        &self.version
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    fn admits_from_below(&self, candidate: &Semver) -> bool {
        match candidate.compare_to(&self.version) {
            Ordering::Greater => true,
            Ordering::Equal => self.inclusive,
            Ordering::Less => false,
        }
    }

    fn admits_from_above(&self, candidate: &Semver) -> bool {
        match candidate.compare_to(&self.version) {
            Ordering::Less => true,
            Ordering::Equal => self.inclusive,
            Ordering::Greater => false,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.inclusive { "inclusive" } else { "exclusive" }
        )
    }
}

/// The normal form every range token reduces to: an optional lower and an
/// optional upper endpoint. A missing endpoint is unbounded on that side; a
/// pair with neither endpoint matches every version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundPair {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl BoundPair {
    pub fn new(lower: Option<Bound>, upper: Option<Bound>) -> Self {
        BoundPair { lower, upper }
    }

    /// The pair produced by `*` and the empty range: unbounded on both sides.
    pub fn any() -> Self {
        BoundPair {
            lower: None,
            upper: None,
        }
    }

    /// The degenerate pair for an exact version match.
    pub fn exact(version: Semver) -> Self {
        BoundPair {
            lower: Some(Bound::inclusive(version.clone())),
            upper: Some(Bound::inclusive(version)),
        }
    }

    pub fn lower(&self) -> Option<&Bound> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Bound> {
        self.upper.as_ref()
    }

    /// Both comparators hold, each per its own inclusivity.
    pub fn is_satisfied_by(&self, version: &Semver) -> bool {
        if let Some(lower) = &self.lower {
            if !lower.admits_from_below(version) {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            if !upper.admits_from_above(version) {
                return false;
            }
        }
        true
    }

    /// Endpoint versions present on this pair, lower first.
    pub(crate) fn endpoints(&self) -> impl Iterator<Item = &Semver> {
        self.lower
            .iter()
            .chain(self.upper.iter())
            .map(Bound::version)
    }
}

impl fmt::Display for BoundPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (None, None) => write!(f, "*"),
            (Some(lower), None) => {
                write!(f, "{}{}", if lower.inclusive { ">=" } else { ">" }, lower.version)
            }
            (None, Some(upper)) => {
                write!(f, "{}{}", if upper.inclusive { "<=" } else { "<" }, upper.version)
            }
            (Some(lower), Some(upper)) => write!(
                f,
                "{}{} {}{}",
                if lower.inclusive { ">=" } else { ">" },
                lower.version,
                if upper.inclusive { "<=" } else { "<" },
                upper.version
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Semver {
        Semver::parse(text).unwrap()
    }

    #[test]
    fn test_inclusive_lower() {
        let pair = BoundPair::new(Some(Bound::inclusive(v("1.2.3"))), None);
        assert!(pair.is_satisfied_by(&v("1.2.3")));
        assert!(pair.is_satisfied_by(&v("9.0.0")));
        assert!(!pair.is_satisfied_by(&v("1.2.2")));
    }

    #[test]
    fn test_exclusive_upper() {
        let pair = BoundPair::new(None, Some(Bound::exclusive(v("2.0.0"))));
        assert!(pair.is_satisfied_by(&v("1.9.9")));
        assert!(!pair.is_satisfied_by(&v("2.0.0")));
    }

    #[test]
    fn test_exact_pair() {
        let pair = BoundPair::exact(v("1.2.3"));
        assert!(pair.is_satisfied_by(&v("1.2.3")));
        assert!(pair.is_satisfied_by(&v("1.2.3+build")));
        assert!(!pair.is_satisfied_by(&v("1.2.4")));
        assert!(!pair.is_satisfied_by(&v("1.2.3-rc.1")));
    }

    #[test]
    fn test_any_matches_everything() {
        let pair = BoundPair::any();
        assert!(pair.is_satisfied_by(&v("0.0.0")));
        assert!(pair.is_satisfied_by(&v("99.99.99")));
        assert!(pair.endpoints().next().is_none());
    }

    #[test]
    fn test_bounds_use_precedence_not_text() {
        let pair = BoundPair::new(Some(Bound::exclusive(v("1.2.3"))), None);
        // Same precedence as the endpoint despite different build metadata.
        assert!(!pair.is_satisfied_by(&v("1.2.3+build")));
    }

    #[test]
    fn test_display() {
        let pair = BoundPair::new(
            Some(Bound::inclusive(v("1.2.3"))),
            Some(Bound::exclusive(v("2.0.0"))),
        );
        assert_eq!(pair.to_string(), ">=1.2.3 <2.0.0");
        assert_eq!(BoundPair::any().to_string(), "*");
    }
}
