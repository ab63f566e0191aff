//! Strict grammar parser for `major.minor.patch[-pre][+build]`

use thiserror::Error;

/// A structured parse failure.
///
/// Every variant carries the offending substring and its byte offset within
/// the trimmed input, so callers can point diagnostics at the exact spot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The `major.minor.patch` shape is broken: missing or surplus
    /// components, or trailing text where none is allowed.
    #[error("malformed version structure at offset {offset} in \"{text}\"")]
    MalformedStructure { text: String, offset: usize },
    /// A numeric component contains non-digits or overflows 32 bits.
    #[error("invalid numeric component \"{text}\" at offset {offset}")]
    InvalidNumericComponent { text: String, offset: usize },
    /// A numeric component or numeric pre-release identifier starts with `0`.
    #[error("leading zero in \"{text}\" at offset {offset}")]
    LeadingZero { text: String, offset: usize },
    /// An identifier contains a character outside `[0-9A-Za-z-]`.
    #[error("invalid character in identifier \"{text}\" at offset {offset}")]
    InvalidIdentifierCharacter { text: String, offset: usize },
    /// A dot-separated identifier segment is empty.
    #[error("empty identifier segment at offset {offset} in \"{text}\"")]
    EmptyIdentifierSegment { text: String, offset: usize },
}

/// Raw components of a successfully parsed version.
pub(crate) struct VersionParts {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: Vec<String>,
    pub build: Vec<String>,
}

/// Parse a trimmed version string into its components.
pub(crate) fn parse_components(text: &str) -> Result<VersionParts, ParseError> {
    if text.is_empty() {
        return Err(ParseError::MalformedStructure {
            text: String::new(),
            offset: 0,
        });
    }

    // The build section starts at the first '+'; '+' is not a legal
    // identifier character, so a second occurrence is caught below.
    let (before_build, build_section) = match text.find('+') {
        Some(pos) => (&text[..pos], Some((&text[pos + 1..], pos + 1))),
        None => (text, None),
    };

    // The numeric core cannot contain '-', so the first '-' before the
    // build marker opens the pre-release section.
    let (core, pre_section) = match before_build.find('-') {
        Some(pos) => (&before_build[..pos], Some((&before_build[pos + 1..], pos + 1))),
        None => (before_build, None),
    };

    let mut numbers = [0u32; 3];
    let mut offset = 0;
    let mut index = 0;
    for component in core.split('.') {
        if index == 3 {
            return Err(ParseError::MalformedStructure {
                text: core[offset - 1..].to_string(),
                offset: offset - 1,
            });
        }
        numbers[index] = parse_numeric_component(component, offset)?;
        index += 1;
        offset += component.len() + 1;
    }
    if index < 3 {
        return Err(ParseError::MalformedStructure {
            text: core.to_string(),
            offset: core.len(),
        });
    }

    let pre_release = match pre_section {
        Some((section, start)) => parse_identifiers(section, start, true)?,
        None => Vec::new(),
    };
    let build = match build_section {
        Some((section, start)) => parse_identifiers(section, start, false)?,
        None => Vec::new(),
    };

    Ok(VersionParts {
        major: numbers[0],
        minor: numbers[1],
        patch: numbers[2],
        pre_release,
        build,
    })
}

fn parse_numeric_component(component: &str, offset: usize) -> Result<u32, ParseError> {
    if component.is_empty() {
        return Err(ParseError::MalformedStructure {
            text: component.to_string(),
            offset,
        });
    }
    if !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumericComponent {
            text: component.to_string(),
            offset,
        });
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(ParseError::LeadingZero {
            text: component.to_string(),
            offset,
        });
    }
    component
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidNumericComponent {
            text: component.to_string(),
            offset,
        })
}

fn parse_identifiers(
    section: &str,
    start: usize,
    reject_numeric_leading_zero: bool,
) -> Result<Vec<String>, ParseError> {
    let mut identifiers = Vec::new();
    let mut offset = start;

    // split("") never yields an empty iterator, so a bare trailing '-' or
    // '+' surfaces as an empty first segment here.
    for identifier in section.split('.') {
        if identifier.is_empty() {
            return Err(ParseError::EmptyIdentifierSegment {
                text: section.to_string(),
                offset,
            });
        }
        for (i, b) in identifier.bytes().enumerate() {
            if !b.is_ascii_alphanumeric() && b != b'-' {
                return Err(ParseError::InvalidIdentifierCharacter {
                    text: identifier.to_string(),
                    offset: offset + i,
                });
            }
        }
        let numeric = identifier.bytes().all(|b| b.is_ascii_digit());
        if reject_numeric_leading_zero && numeric && identifier.len() > 1 && identifier.starts_with('0') {
            return Err(ParseError::LeadingZero {
                text: identifier.to_string(),
                offset,
            });
        }
        identifiers.push(identifier.to_string());
        offset += identifier.len() + 1;
    }

    Ok(identifiers)
}
