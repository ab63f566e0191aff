//! Pure version arithmetic: increments and pre-release/build rewrites
//!
//! Every helper builds a fresh canonical string and re-enters the strict
//! parser, so there is exactly one construction path and the grammar rules
//! (identifier character classes, leading zeros, 32-bit components) apply to
//! derived versions too.

use crate::parser::ParseError;
use crate::Semver;

impl Semver {
    /// The next closest major version.
    ///
    /// A pre-release of a bare major (`2.0.0-alpha`) resolves to that major
    /// (`2.0.0`); anything else increments (`2.1.3` to `3.0.0`). Build
    /// metadata is kept.
    pub fn next_major(&self) -> Result<Semver, ParseError> {
        let major = if self.minor() == 0 && self.patch() == 0 && !self.pre_release().is_empty() {
            u64::from(self.major())
        } else {
            u64::from(self.major()) + 1
        };
        self.rebuild(major, 0, 0, &[], self.build())
    }

    /// Increment major by one, leaving every other field untouched.
    pub fn with_inc_major(&self) -> Result<Semver, ParseError> {
        self.with_inc_major_by(1)
    }

    /// Increment major by `number`, leaving every other field untouched.
    pub fn with_inc_major_by(&self, number: u32) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()) + u64::from(number),
            u64::from(self.minor()),
            u64::from(self.patch()),
            self.pre_release(),
            self.build(),
        )
    }

    /// The next closest minor version; pre-releases of it collapse to it.
    pub fn next_minor(&self) -> Result<Semver, ParseError> {
        let minor = if self.patch() == 0 && !self.pre_release().is_empty() {
            u64::from(self.minor())
        } else {
            u64::from(self.minor()) + 1
        };
        self.rebuild(u64::from(self.major()), minor, 0, &[], self.build())
    }

    /// Increment minor by one, leaving every other field untouched.
    pub fn with_inc_minor(&self) -> Result<Semver, ParseError> {
        self.with_inc_minor_by(1)
    }

    /// Increment minor by `number`, leaving every other field untouched.
    pub fn with_inc_minor_by(&self, number: u32) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()) + u64::from(number),
            u64::from(self.patch()),
            self.pre_release(),
            self.build(),
        )
    }

    /// The next closest patch version; a pre-release collapses to its release.
    pub fn next_patch(&self) -> Result<Semver, ParseError> {
        let patch = if self.pre_release().is_empty() {
            u64::from(self.patch()) + 1
        } else {
            u64::from(self.patch())
        };
        self.rebuild(u64::from(self.major()), u64::from(self.minor()), patch, &[], self.build())
    }

    /// Increment patch by one, leaving every other field untouched.
    pub fn with_inc_patch(&self) -> Result<Semver, ParseError> {
        self.with_inc_patch_by(1)
    }

    /// Increment patch by `number`, leaving every other field untouched.
    pub fn with_inc_patch_by(&self, number: u32) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()) + u64::from(number),
            self.pre_release(),
            self.build(),
        )
    }

    /// Replace the pre-release section, e.g. `"beta.1"`.
    pub fn with_pre_release(&self, pre_release: &str) -> Result<Semver, ParseError> {
        let identifiers: Vec<String> = pre_release.split('.').map(str::to_string).collect();
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()),
            &identifiers,
            self.build(),
        )
    }

    /// Replace the build section, e.g. `"exp.sha.5114f85"`.
    pub fn with_build(&self, build: &str) -> Result<Semver, ParseError> {
        let identifiers: Vec<String> = build.split('.').map(str::to_string).collect();
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()),
            self.pre_release(),
            &identifiers,
        )
    }

    /// Drop the pre-release section.
    pub fn with_cleared_pre_release(&self) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()),
            &[],
            self.build(),
        )
    }

    /// Drop the build section.
    pub fn with_cleared_build(&self) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()),
            self.pre_release(),
            &[],
        )
    }

    /// Drop both the pre-release and build sections.
    pub fn with_cleared_pre_release_and_build(&self) -> Result<Semver, ParseError> {
        self.rebuild(
            u64::from(self.major()),
            u64::from(self.minor()),
            u64::from(self.patch()),
            &[],
            &[],
        )
    }

    // Arithmetic runs in u64 so an overflowing component reaches the parser
    // intact and is rejected as InvalidNumericComponent.
    fn rebuild(
        &self,
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: &[String],
        build: &[String],
    ) -> Result<Semver, ParseError> {
        let mut text = format!("{major}.{minor}.{patch}");
        if !pre_release.is_empty() {
            text.push('-');
            text.push_str(&pre_release.join("."));
        }
        if !build.is_empty() {
            text.push('+');
            text.push_str(&build.join("."));
        }
        Semver::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Semver {
        Semver::parse(text).unwrap()
    }

    #[test]
    fn test_next_major() {
        assert_eq!(v("1.2.3").next_major().unwrap().version(), "2.0.0");
        assert_eq!(v("2.0.0-alpha").next_major().unwrap().version(), "2.0.0");
        assert_eq!(v("2.1.0-alpha").next_major().unwrap().version(), "3.0.0");
        assert_eq!(v("1.2.3+build").next_major().unwrap().version(), "2.0.0+build");
    }

    #[test]
    fn test_next_minor() {
        assert_eq!(v("1.2.3").next_minor().unwrap().version(), "1.3.0");
        assert_eq!(v("1.3.0-rc.1").next_minor().unwrap().version(), "1.3.0");
        assert_eq!(v("1.3.2-rc.1").next_minor().unwrap().version(), "1.4.0");
    }

    #[test]
    fn test_next_patch() {
        assert_eq!(v("1.2.3").next_patch().unwrap().version(), "1.2.4");
        assert_eq!(v("1.2.3-rc.1").next_patch().unwrap().version(), "1.2.3");
    }

    #[test]
    fn test_with_inc_keeps_other_fields() {
        let version = v("1.2.3-beta.1+sha");
        assert_eq!(version.with_inc_major().unwrap().version(), "2.2.3-beta.1+sha");
        assert_eq!(version.with_inc_minor_by(3).unwrap().version(), "1.5.3-beta.1+sha");
        assert_eq!(version.with_inc_patch().unwrap().version(), "1.2.4-beta.1+sha");
    }

    #[test]
    fn test_with_pre_release_and_build() {
        assert_eq!(v("1.2.3").with_pre_release("beta.1").unwrap().version(), "1.2.3-beta.1");
        assert_eq!(v("1.2.3").with_build("sha.1").unwrap().version(), "1.2.3+sha.1");
        assert_eq!(
            v("1.2.3+old").with_pre_release("rc.2").unwrap().version(),
            "1.2.3-rc.2+old"
        );
    }

    #[test]
    fn test_setters_revalidate() {
        assert!(matches!(
            v("1.2.3").with_pre_release("01"),
            Err(ParseError::LeadingZero { .. })
        ));
        assert!(matches!(
            v("1.2.3").with_pre_release("beta_1"),
            Err(ParseError::InvalidIdentifierCharacter { .. })
        ));
        assert!(matches!(
            v("1.2.3").with_build(""),
            Err(ParseError::EmptyIdentifierSegment { .. })
        ));
    }

    #[test]
    fn test_cleared_sections() {
        let version = v("1.2.3-beta.1+sha");
        assert_eq!(version.with_cleared_pre_release().unwrap().version(), "1.2.3+sha");
        assert_eq!(version.with_cleared_build().unwrap().version(), "1.2.3-beta.1");
        assert_eq!(version.with_cleared_pre_release_and_build().unwrap().version(), "1.2.3");
    }

    #[test]
    fn test_increment_overflow_is_rejected() {
        let version = v("4294967295.0.0");
        assert!(matches!(
            version.with_inc_major(),
            Err(ParseError::InvalidNumericComponent { .. })
        ));
    }

    #[test]
    fn test_originals_never_mutate() {
        let version = v("1.2.3");
        let _ = version.next_major().unwrap();
        assert_eq!(version.version(), "1.2.3");
    }
}
