//! Comparator operator tokens for range constraints

use std::fmt;

use thiserror::Error;

/// Comparison operators accepted in range tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (`=`, or no operator at all)
    Equal,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqual,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Parse an operator token; the empty string means equality.
    pub fn from_str(s: &str) -> Result<Self, InvalidOperatorError> {
        match s {
            "" | "=" => Ok(Operator::Equal),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(InvalidOperatorError(s.to_string())),
        }
    }

    /// The canonical token for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for token in ["=", "<", "<=", ">", ">="] {
            assert_eq!(Operator::from_str(token).unwrap().as_str(), token);
        }
    }

    #[test]
    fn test_empty_means_equal() {
        assert_eq!(Operator::from_str("").unwrap(), Operator::Equal);
    }

    #[test]
    fn test_invalid() {
        assert!(Operator::from_str("!=").is_err());
        assert!(Operator::from_str("~").is_err());
        assert!(Operator::from_str("==").is_err());
    }
}
