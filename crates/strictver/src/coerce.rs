//! Best-effort coercion of loosely-formatted strings into versions

use lazy_static::lazy_static;
use regex::Regex;

use crate::Semver;

lazy_static! {
    // First run of up to three dot-separated numeric components, bounded by
    // non-digits; later components are simply cut off ("1.2.3.4" -> "1.2.3").
    static ref COERCE_RE: Regex =
        Regex::new(r"(?:^|\D)(\d{1,10})(?:\.(\d{1,10}))?(?:\.(\d{1,10}))?(?:$|\D)").unwrap();
}

impl Semver {
    /// Coerce a string into a version if at all possible.
    ///
    /// Strict parsing is attempted first; failing that, the first numeric run
    /// is extracted and missing components are zero-filled (`"v2"` becomes
    /// `2.0.0`, `"system-1.2-rev"` becomes `1.2.0`). Returns `None` when no
    /// parseable version can be extracted.
    pub fn coerce(text: &str) -> Option<Semver> {
        if let Ok(version) = Semver::parse(text) {
            return Some(version);
        }

        let caps = COERCE_RE.captures(text.trim())?;
        let major = caps.get(1)?.as_str();
        let minor = caps.get(2).map_or("0", |m| m.as_str());
        let patch = caps.get(3).map_or("0", |m| m.as_str());
        Semver::parse(&format!("{major}.{minor}.{patch}")).ok()
    }
}
