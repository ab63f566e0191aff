//! Strict semantic versioning: parsing, precedence, and range matching
//!
//! This crate parses versions against the strict
//! `major.minor.patch[-pre][+build]` grammar, totally orders them by
//! semantic-versioning precedence (build metadata excluded), and evaluates range
//! expressions (`^1.2.3`, `~1.2`, `1.2.3 - 2.0.0`, `1.x`,
//! `>=1.0.0 <2.0.0 || ^3.0`) against them. All types are immutable values;
//! every deriving operation returns a fresh instance.

mod coerce;
mod comparator;
mod differ;
mod modifier;
mod parser;
pub mod range;
mod version;

pub use differ::VersionDiff;
pub use parser::ParseError;
pub use range::{Bound, BoundPair, Operator, RangeError, RangesList};
pub use version::{Semver, ZERO};

/// Sort version strings ascending by precedence.
///
/// Entries that do not parse are dropped; ties keep their input order.
pub fn sort(versions: &[&str]) -> Vec<String> {
    sorted(versions, true)
}

/// Sort version strings descending by precedence.
pub fn rsort(versions: &[&str]) -> Vec<String> {
    sorted(versions, false)
}

fn sorted(versions: &[&str], ascending: bool) -> Vec<String> {
    let mut parsed: Vec<(Semver, &str)> = versions
        .iter()
        .filter_map(|text| Semver::parse(text).ok().map(|version| (version, *text)))
        .collect();

    parsed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare_to(b);
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    parsed.into_iter().map(|(_, text)| text.to_string()).collect()
}

/// All versions that satisfy the range, in input order.
///
/// Unparseable versions are dropped; an unparseable range matches nothing.
pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
    let Ok(ranges) = RangesList::parse(range) else {
        return Vec::new();
    };
    versions
        .iter()
        .filter_map(|text| {
            let version = Semver::parse(text).ok()?;
            version.satisfies_ranges(&ranges).then(|| text.to_string())
        })
        .collect()
}

/// The highest version satisfying the range, if any.
pub fn max_satisfying(versions: &[&str], range: &str) -> Option<Semver> {
    satisfying_extreme(versions, range, true)
}

/// The lowest version satisfying the range, if any.
pub fn min_satisfying(versions: &[&str], range: &str) -> Option<Semver> {
    satisfying_extreme(versions, range, false)
}

fn satisfying_extreme(versions: &[&str], range: &str, max: bool) -> Option<Semver> {
    let ranges = RangesList::parse(range).ok()?;
    let mut best: Option<Semver> = None;
    for text in versions {
        let Ok(version) = Semver::parse(text) else {
            continue;
        };
        if !version.satisfies_ranges(&ranges) {
            continue;
        }
        let better = match &best {
            None => true,
            Some(current) => {
                if max {
                    version.is_greater_than(current)
                } else {
                    version.is_lower_than(current)
                }
            }
        };
        if better {
            best = Some(version);
        }
    }
    best
}
