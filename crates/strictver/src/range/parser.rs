//! Range token grammar: one space-free constraint token to a bound pair

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::{Bound, BoundPair, Operator};
use crate::Semver;

/// Failure to parse a range expression.
///
/// One invalid token fails the whole expression; the offending token rides
/// along for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid range syntax \"{token}\"")]
    InvalidRangeSyntax { token: String },
}

impl RangeError {
    pub(crate) fn invalid(token: &str) -> Self {
        RangeError::InvalidRangeSyntax {
            token: token.to_string(),
        }
    }
}

lazy_static! {
    // Wildcard-only tokens: *, x, X, x.x, v*, ...
    static ref WILDCARD_RE: Regex = Regex::new(r"^[vV]?[xX*](\.[xX*])*$").unwrap();

    // Operator plus possibly-partial version body. Wildcard components are
    // treated as omitted. A leading v is tolerated here but not in the
    // strict version grammar.
    static ref COMPARATOR_RE: Regex = Regex::new(
        r"^(>=|<=|>|<|=)?[vV]?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$"
    )
    .unwrap();
}

/// A version body with possibly-omitted components, before completion.
/// Build metadata is captured by the grammar but never affects bounds.
struct Partial {
    major: Option<u32>,
    minor: Option<u32>,
    patch: Option<u32>,
    pre: Option<String>,
}

impl Partial {
    fn is_full(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }
}

/// Parse one space-free constraint token into its normalized bound pair.
pub(crate) fn parse_comparator(token: &str) -> Result<BoundPair, RangeError> {
    if WILDCARD_RE.is_match(token) {
        return Ok(BoundPair::any());
    }

    if let Some(body) = token.strip_prefix('^') {
        let partial = parse_partial(body, token)?;
        return caret_bounds(&partial, token);
    }

    if let Some(body) = token.strip_prefix('~') {
        // "~>" is a common typo for "~"; reject it rather than guess.
        if body.starts_with('>') {
            return Err(RangeError::invalid(token));
        }
        let partial = parse_partial(body, token)?;
        return tilde_bounds(&partial, token);
    }

    let caps = COMPARATOR_RE
        .captures(token)
        .ok_or_else(|| RangeError::invalid(token))?;
    let operator = Operator::from_str(caps.get(1).map_or("", |m| m.as_str()))
        .map_err(|_| RangeError::invalid(token))?;
    let partial = partial_from_captures(&caps, token)?;

    match operator {
        Operator::Equal => equal_bounds(&partial, token),
        Operator::GreaterThan => greater_than_bounds(&partial, token),
        Operator::GreaterThanOrEqual => greater_equal_bounds(&partial, token),
        Operator::LessThan => less_than_bounds(&partial, token),
        Operator::LessThanOrEqual => less_equal_bounds(&partial, token),
    }
}

/// Parse a hyphen range `from - to`, already split into its two version
/// tokens. Neither side admits an operator prefix.
pub(crate) fn parse_hyphen(from: &str, to: &str) -> Result<BoundPair, RangeError> {
    let low = hyphen_operand(from)?;
    let high = hyphen_operand(to)?;

    let lower = match low.major {
        None => None,
        Some(major) => Some(Bound::inclusive(version_of(
            major,
            low.minor.unwrap_or(0),
            low.patch.unwrap_or(0),
            low.pre.as_deref(),
            from,
        )?)),
    };

    let upper = match high.major {
        None => None,
        Some(major) => Some(if high.is_full() {
            Bound::inclusive(version_of(
                major,
                high.minor.unwrap_or(0),
                high.patch.unwrap_or(0),
                high.pre.as_deref(),
                to,
            )?)
        } else if let Some(minor) = high.minor {
            // Partial upper bounds widen to the next unit, exclusive.
            Bound::exclusive(version_of(major, inc(minor, to)?, 0, None, to)?)
        } else {
            Bound::exclusive(version_of(inc(major, to)?, 0, 0, None, to)?)
        }),
    };

    Ok(BoundPair::new(lower, upper))
}

fn hyphen_operand(token: &str) -> Result<Partial, RangeError> {
    if WILDCARD_RE.is_match(token) {
        return Ok(Partial {
            major: None,
            minor: None,
            patch: None,
            pre: None,
        });
    }
    parse_partial(token, token)
}

/// Parse an operator-free version body.
fn parse_partial(body: &str, token: &str) -> Result<Partial, RangeError> {
    let caps = COMPARATOR_RE
        .captures(body)
        .ok_or_else(|| RangeError::invalid(token))?;
    if caps.get(1).is_some() {
        return Err(RangeError::invalid(token));
    }
    partial_from_captures(&caps, token)
}

fn partial_from_captures(caps: &regex::Captures, token: &str) -> Result<Partial, RangeError> {
    let major = component(caps.get(2), token)?;
    let mut minor = component(caps.get(3), token)?;
    let mut patch = component(caps.get(4), token)?;

    // A wildcard leaves everything at and below its position unconstrained.
    if major.is_none() {
        minor = None;
    }
    if minor.is_none() {
        patch = None;
    }

    let pre = caps.get(5).map(|m| m.as_str().to_string());
    let partial = Partial {
        major,
        minor,
        patch,
        pre,
    };

    // The grammar only attaches pre-release data to fully specified bodies.
    if partial.pre.is_some() && !partial.is_full() {
        return Err(RangeError::invalid(token));
    }

    Ok(partial)
}

fn component(cap: Option<regex::Match>, token: &str) -> Result<Option<u32>, RangeError> {
    match cap {
        None => Ok(None),
        Some(m) if matches!(m.as_str(), "x" | "X" | "*") => Ok(None),
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| RangeError::invalid(token)),
    }
}

/// Materialize a bound endpoint through the strict parser, so range
/// endpoints obey the same identifier rules as ordinary versions.
fn version_of(
    major: u32,
    minor: u32,
    patch: u32,
    pre: Option<&str>,
    token: &str,
) -> Result<Semver, RangeError> {
    let text = match pre {
        Some(pre) => format!("{major}.{minor}.{patch}-{pre}"),
        None => format!("{major}.{minor}.{patch}"),
    };
    Semver::parse(&text).map_err(|_| RangeError::invalid(token))
}

fn inc(value: u32, token: &str) -> Result<u32, RangeError> {
    value.checked_add(1).ok_or_else(|| RangeError::invalid(token))
}

fn equal_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    if p.is_full() {
        let version = version_of(
            major,
            p.minor.unwrap_or(0),
            p.patch.unwrap_or(0),
            p.pre.as_deref(),
            token,
        )?;
        return Ok(BoundPair::exact(version));
    }
    let (lower, upper) = match p.minor {
        Some(minor) => (
            version_of(major, minor, 0, None, token)?,
            version_of(major, inc(minor, token)?, 0, None, token)?,
        ),
        None => (
            version_of(major, 0, 0, None, token)?,
            version_of(inc(major, token)?, 0, 0, None, token)?,
        ),
    };
    Ok(BoundPair::new(
        Some(Bound::inclusive(lower)),
        Some(Bound::exclusive(upper)),
    ))
}

fn greater_than_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let lower = if p.is_full() {
        Bound::exclusive(version_of(
            major,
            p.minor.unwrap_or(0),
            p.patch.unwrap_or(0),
            p.pre.as_deref(),
            token,
        )?)
    } else if let Some(minor) = p.minor {
        // A partial target widens: nothing at the omitted level can exceed
        // it, so the bound moves up one unit and becomes inclusive.
        Bound::inclusive(version_of(major, inc(minor, token)?, 0, None, token)?)
    } else {
        Bound::inclusive(version_of(inc(major, token)?, 0, 0, None, token)?)
    };
    Ok(BoundPair::new(Some(lower), None))
}

fn greater_equal_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let lower = Bound::inclusive(version_of(
        major,
        p.minor.unwrap_or(0),
        p.patch.unwrap_or(0),
        p.pre.as_deref(),
        token,
    )?);
    Ok(BoundPair::new(Some(lower), None))
}

fn less_than_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let upper = Bound::exclusive(version_of(
        major,
        p.minor.unwrap_or(0),
        p.patch.unwrap_or(0),
        p.pre.as_deref(),
        token,
    )?);
    Ok(BoundPair::new(None, Some(upper)))
}

fn less_equal_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let upper = if p.is_full() {
        Bound::inclusive(version_of(
            major,
            p.minor.unwrap_or(0),
            p.patch.unwrap_or(0),
            p.pre.as_deref(),
            token,
        )?)
    } else if let Some(minor) = p.minor {
        Bound::exclusive(version_of(major, inc(minor, token)?, 0, None, token)?)
    } else {
        Bound::exclusive(version_of(inc(major, token)?, 0, 0, None, token)?)
    };
    Ok(BoundPair::new(None, Some(upper)))
}

/// Caret: nothing left of the leftmost non-zero component may change.
fn caret_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let lower = Bound::inclusive(version_of(
        major,
        p.minor.unwrap_or(0),
        p.patch.unwrap_or(0),
        p.pre.as_deref(),
        token,
    )?);
    let upper = if major > 0 {
        version_of(inc(major, token)?, 0, 0, None, token)?
    } else {
        match p.minor {
            None => version_of(1, 0, 0, None, token)?,
            Some(minor) if minor > 0 => version_of(0, inc(minor, token)?, 0, None, token)?,
            Some(_) => match p.patch {
                None => version_of(0, 1, 0, None, token)?,
                Some(patch) => version_of(0, 0, inc(patch, token)?, None, token)?,
            },
        }
    };
    Ok(BoundPair::new(Some(lower), Some(Bound::exclusive(upper))))
}

/// Tilde: patch-level changes if minor is given, minor-level otherwise.
fn tilde_bounds(p: &Partial, token: &str) -> Result<BoundPair, RangeError> {
    let Some(major) = p.major else {
        return Ok(BoundPair::any());
    };
    let lower = Bound::inclusive(version_of(
        major,
        p.minor.unwrap_or(0),
        p.patch.unwrap_or(0),
        p.pre.as_deref(),
        token,
    )?);
    let upper = match p.minor {
        Some(minor) => version_of(major, inc(minor, token)?, 0, None, token)?,
        None => version_of(inc(major, token)?, 0, 0, None, token)?,
    };
    Ok(BoundPair::new(Some(lower), Some(Bound::exclusive(upper))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(token: &str) -> String {
        parse_comparator(token).unwrap().to_string()
    }

    #[test]
    fn test_exact_and_partial_equality() {
        assert_eq!(bounds("1.2.3"), ">=1.2.3 <=1.2.3");
        assert_eq!(bounds("=1.2.3"), ">=1.2.3 <=1.2.3");
        assert_eq!(bounds("1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(bounds("1"), ">=1.0.0 <2.0.0");
        assert_eq!(bounds("=1.2.3-rc.1"), ">=1.2.3-rc.1 <=1.2.3-rc.1");
    }

    #[test]
    fn test_wildcards() {
        assert_eq!(bounds("*"), "*");
        assert_eq!(bounds("x"), "*");
        assert_eq!(bounds("X.x.x"), "*");
        assert_eq!(bounds("1.x"), ">=1.0.0 <2.0.0");
        assert_eq!(bounds("1.2.x"), ">=1.2.0 <1.3.0");
        assert_eq!(bounds("1.2.*"), ">=1.2.0 <1.3.0");
        // Components below a wildcard are unconstrained too.
        assert_eq!(bounds("1.x.3"), ">=1.0.0 <2.0.0");
    }

    #[test]
    fn test_greater_than_widening() {
        assert_eq!(bounds(">1.2.3"), ">1.2.3");
        assert_eq!(bounds(">1.2"), ">=1.3.0");
        assert_eq!(bounds(">1"), ">=2.0.0");
        assert_eq!(bounds(">1.2.x"), ">=1.3.0");
    }

    #[test]
    fn test_greater_equal() {
        assert_eq!(bounds(">=1.2.3"), ">=1.2.3");
        assert_eq!(bounds(">=1.2"), ">=1.2.0");
        assert_eq!(bounds(">=1"), ">=1.0.0");
    }

    #[test]
    fn test_less_than() {
        assert_eq!(bounds("<2.0.0"), "<2.0.0");
        assert_eq!(bounds("<1.2"), "<1.2.0");
        assert_eq!(bounds("<1"), "<1.0.0");
    }

    #[test]
    fn test_less_equal_widening() {
        assert_eq!(bounds("<=2.0.0"), "<=2.0.0");
        assert_eq!(bounds("<=1.2"), "<1.3.0");
        assert_eq!(bounds("<=1"), "<2.0.0");
    }

    #[test]
    fn test_tilde() {
        assert_eq!(bounds("~1.2.3"), ">=1.2.3 <1.3.0");
        assert_eq!(bounds("~1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(bounds("~1"), ">=1.0.0 <2.0.0");
        assert_eq!(bounds("~1.2.3-beta.2"), ">=1.2.3-beta.2 <1.3.0");
    }

    #[test]
    fn test_caret() {
        assert_eq!(bounds("^1.2.3"), ">=1.2.3 <2.0.0");
        assert_eq!(bounds("^0.2.3"), ">=0.2.3 <0.3.0");
        assert_eq!(bounds("^0.0.3"), ">=0.0.3 <0.0.4");
        assert_eq!(bounds("^0.0.x"), ">=0.0.0 <0.1.0");
        assert_eq!(bounds("^0.0"), ">=0.0.0 <0.1.0");
        assert_eq!(bounds("^0"), ">=0.0.0 <1.0.0");
        assert_eq!(bounds("^1.x"), ">=1.0.0 <2.0.0");
        assert_eq!(bounds("^1.2"), ">=1.2.0 <2.0.0");
        assert_eq!(bounds("^1.2.3-beta.4"), ">=1.2.3-beta.4 <2.0.0");
    }

    #[test]
    fn test_leading_v_is_tolerated() {
        assert_eq!(bounds(">=v1.2.3"), ">=1.2.3");
        assert_eq!(bounds("v1.2.3"), ">=1.2.3 <=1.2.3");
    }

    #[test]
    fn test_build_metadata_never_constrains() {
        assert_eq!(bounds("^1.2.3+build"), ">=1.2.3 <2.0.0");
        assert_eq!(bounds(">=1.2.3+build"), ">=1.2.3");
    }

    #[test]
    fn test_hyphen_full_and_partial_upper() {
        assert_eq!(parse_hyphen("1.2.3", "2.3.4").unwrap().to_string(), ">=1.2.3 <=2.3.4");
        assert_eq!(parse_hyphen("1.2.3", "2.3").unwrap().to_string(), ">=1.2.3 <2.4.0");
        assert_eq!(parse_hyphen("1.2.3", "2").unwrap().to_string(), ">=1.2.3 <3.0.0");
        assert_eq!(parse_hyphen("1.2", "2.3.4").unwrap().to_string(), ">=1.2.0 <=2.3.4");
        assert_eq!(
            parse_hyphen("1.2.3-alpha", "2.4.3-beta").unwrap().to_string(),
            ">=1.2.3-alpha <=2.4.3-beta"
        );
        assert_eq!(parse_hyphen("*", "2.0.0").unwrap().to_string(), "<=2.0.0");
    }

    #[test]
    fn test_invalid_tokens() {
        for token in [
            "abc",
            ">>1.2.3",
            "~>1.2.3",
            "1.2.3.4",
            ">=1.2-beta",
            "^1.x-alpha",
            "==1.2.3",
            "1.2.3-",
            "!1.2.3",
        ] {
            let result = parse_comparator(token);
            assert!(
                matches!(result, Err(RangeError::InvalidRangeSyntax { .. })),
                "expected syntax error for {token:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_invalid_hyphen_operands() {
        assert!(parse_hyphen(">=1.2.3", "2.0.0").is_err());
        assert!(parse_hyphen("1.2.3", "nope").is_err());
    }

    #[test]
    fn test_pre_release_leading_zero_rejected_in_ranges() {
        assert!(parse_comparator(">=1.2.3-01").is_err());
    }
}
