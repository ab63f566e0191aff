//! OR-combined groups of AND-ed bound pairs

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::parser;
use super::{BoundPair, RangeError};
use crate::Semver;

lazy_static! {
    static ref OR_SPLIT_RE: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    // Whitespace between an operator and its version body is collapsed
    // before tokenizing, so ">=  1.0.0" parses like ">=1.0.0".
    static ref OPERATOR_WS_RE: Regex = Regex::new(r"([<>=~^])\s+").unwrap();
}

/// A parsed range expression: a disjunction of groups, each group a
/// conjunction of bound pairs.
///
/// Construction is deterministic — the same input always yields the same
/// group and bound ordering — and the value is immutable afterwards, so it
/// can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangesList {
    groups: Vec<Vec<BoundPair>>,
    source: String,
}

impl RangesList {
    /// Parse a full range expression.
    ///
    /// Groups are separated by `||`; within a group, whitespace (and commas)
    /// separate AND-ed constraint tokens, with hyphen ranges detected before
    /// per-token dispatch. An empty expression matches any version.
    pub fn parse(text: &str) -> Result<Self, RangeError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(RangesList {
                groups: vec![vec![BoundPair::any()]],
                source: String::new(),
            });
        }

        let parts: Vec<&str> = OR_SPLIT_RE.split(trimmed).collect();
        if parts.first().is_some_and(|s| s.is_empty())
            || parts.last().is_some_and(|s| s.is_empty())
        {
            return Err(RangeError::invalid(trimmed));
        }

        let mut groups = Vec::with_capacity(parts.len());
        for part in parts {
            groups.push(Self::parse_group(part)?);
        }

        Ok(RangesList {
            groups,
            source: trimmed.to_string(),
        })
    }

    fn parse_group(group: &str) -> Result<Vec<BoundPair>, RangeError> {
        let collapsed = OPERATOR_WS_RE.replace_all(group, "$1");
        let normalized = collapsed.replace(',', " ");
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(RangeError::invalid(group.trim()));
        }

        let mut pairs = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i] == "-" {
                return Err(RangeError::invalid(group.trim()));
            }
            if tokens.get(i + 1) == Some(&"-") {
                let to = tokens
                    .get(i + 2)
                    .ok_or_else(|| RangeError::invalid(group.trim()))?;
                pairs.push(parser::parse_hyphen(tokens[i], to)?);
                i += 3;
            } else {
                pairs.push(parser::parse_comparator(tokens[i])?);
                i += 1;
            }
        }
        Ok(pairs)
    }

    /// The parsed groups: outer disjunction, inner conjunction.
    pub fn groups(&self) -> &[Vec<BoundPair>] {
        &self.groups
    }

    /// Whether the version satisfies at least one group.
    pub fn is_satisfied_by(&self, version: &Semver) -> bool {
        self.groups
            .iter()
            .any(|group| Self::group_satisfied(group, version))
    }

    fn group_satisfied(group: &[BoundPair], version: &Semver) -> bool {
        if !group.iter().all(|pair| pair.is_satisfied_by(version)) {
            return false;
        }
        if version.pre_release().is_empty() {
            return true;
        }
        // A pre-release only satisfies a group that named a pre-release on
        // the identical numeric triple; plain release ranges never admit
        // pre-releases silently.
        group.iter().flat_map(BoundPair::endpoints).any(|endpoint| {
            !endpoint.pre_release().is_empty()
                && endpoint.major() == version.major()
                && endpoint.minor() == version.minor()
                && endpoint.patch() == version.patch()
        })
    }
}

impl fmt::Display for RangesList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.source)
        }
    }
}
