//! Precedence comparison between parsed versions
//!
//! This is the single ordering authority: the predicate family on
//! [`Semver`](crate::Semver) and the bound checks in the range engine all
//! delegate here.

use std::cmp::Ordering;

use crate::Semver;

/// Total precedence order over two versions, build metadata excluded.
pub(crate) fn compare(a: &Semver, b: &Semver) -> Ordering {
    let triple = a
        .major()
        .cmp(&b.major())
        .then_with(|| a.minor().cmp(&b.minor()))
        .then_with(|| a.patch().cmp(&b.patch()));
    if triple != Ordering::Equal {
        return triple;
    }
    compare_pre_release(a.pre_release(), b.pre_release())
}

/// A release outranks any of its pre-releases; otherwise identifiers are
/// compared positionally, and a strict prefix sorts first.
fn compare_pre_release(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (x, y) in a.iter().zip(b.iter()) {
        let ord = compare_identifiers(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        // Leading zeros are rejected at parse time, so longer digit runs are
        // numerically larger and equal-length runs compare byte-wise.
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

pub(crate) fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}
