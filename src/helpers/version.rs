// Version string helpers

use semver::Version;

/// Strip a release tag down to its version text: "v1.2.0" → "1.2.0".
pub fn normalize_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix(['v', 'V']).unwrap_or(tag)
}

/// Parse a version leniently.
///
/// Accepts a leading `v`, and pads missing minor/patch components with zeros so
/// that release tags like "2.0" or "v3" still compare by semver ordering.
/// Pre-release and build suffixes are kept as-is.
pub fn parse_version(raw: &str) -> Result<Version, semver::Error> {
    let text = normalize_tag(raw);
    if let Ok(version) = Version::parse(text) {
        return Ok(version);
    }

    // Split off "-pre" / "+build" before counting numeric components
    let core_end = text.find(['-', '+']).unwrap_or(text.len());
    let (core, suffix) = text.split_at(core_end);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => text.to_string(),
    };
    Version::parse(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("v1.2.0"), "1.2.0");
        assert_eq!(normalize_tag("V2.0"), "2.0");
        assert_eq!(normalize_tag(" 1.0.0 "), "1.0.0");
    }

    #[test]
    fn test_parse_padded() {
        assert_eq!(parse_version("2.0").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_version("v3").unwrap(), Version::new(3, 0, 0));
        assert_eq!(parse_version("1.4-beta.1").unwrap().to_string(), "1.4.0-beta.1");
        assert!(parse_version("nightly").is_err());
    }

    #[test]
    fn test_semver_ordering() {
        let v = |s| parse_version(s).unwrap();
        assert!(v("1.2.0") > v("1.0.0"));
        assert!(v("v1.0") == v("1.0.0"));
        assert!(v("1.10.0") > v("1.9.0"));
        // A prerelease sorts before its release
        assert!(v("1.2.0-rc.1") < v("1.2.0"));
    }
}
