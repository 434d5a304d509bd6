use semver::Version;
use std::fmt;

use hey_constants::LATEST_TAG;
use hey_error::{HeyError, Result};
use hey_registry::RegistryEntry;

/// A requested version before it has been pinned to a concrete release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Latest,
    Tag(String),
    Exact(Version),
}

impl VersionSpec {
    /// `latest` or an empty string is the latest tag, anything that parses as
    /// semver is exact, everything else is taken as a dist-tag name.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() || spec == LATEST_TAG {
            return Ok(Self::Latest);
        }

        let stripped = spec.strip_prefix('v').unwrap_or(spec);
        if let Ok(version) = Version::parse(stripped) {
            return Ok(Self::Exact(version));
        }

        let is_range = |c: char| {
            c.is_whitespace() || matches!(c, '^' | '~' | '>' | '<' | '=' | '*' | '|')
        };
        if spec.chars().any(is_range) {
            return Err(HeyError::invalid_argument(format!(
                "version ranges are not supported, use an exact version or a tag: '{spec}'"
            )));
        }

        Ok(Self::Tag(spec.to_string()))
    }

    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST_TAG),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Exact(version) => write!(f, "{version}"),
        }
    }
}

/// Pin a spec to a concrete version using an already fetched registry entry.
pub fn resolve_spec(entry: &RegistryEntry, spec: &VersionSpec) -> Result<Version> {
    let raw = match spec {
        VersionSpec::Exact(version) => return Ok(version.clone()),
        VersionSpec::Latest => entry.latest_version()?,
        VersionSpec::Tag(tag) => entry.dist_tag(tag).ok_or_else(|| HeyError::UnknownDistTag {
            name: entry.name.clone(),
            tag: tag.clone(),
        })?,
    };

    Version::parse(raw).map_err(|e| {
        HeyError::MissingVersionData(format!(
            "{} tag '{spec}' points at invalid version '{raw}': {e}",
            entry.name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_latest() {
        assert_eq!(VersionSpec::parse("latest").unwrap(), VersionSpec::Latest);
        assert_eq!(VersionSpec::parse("").unwrap(), VersionSpec::Latest);
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(
            VersionSpec::parse("1.3.0").unwrap(),
            VersionSpec::Exact(Version::new(1, 3, 0))
        );
        assert_eq!(
            VersionSpec::parse("v2.0.1").unwrap(),
            VersionSpec::Exact(Version::new(2, 0, 1))
        );
        assert!(VersionSpec::parse("0.0.2-alpha.0").unwrap().is_concrete());
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(
            VersionSpec::parse("next").unwrap(),
            VersionSpec::Tag("next".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_ranges() {
        assert!(VersionSpec::parse("^1.0.0").is_err());
        assert!(VersionSpec::parse(">=1 <2").is_err());
    }

    #[test]
    fn test_resolve_spec() {
        let entry = RegistryEntry::from_json(
            "demo",
            &json!({ "dist-tags": { "latest": "1.3.0", "next": "2.0.0-rc.1" } }),
        );

        assert_eq!(
            resolve_spec(&entry, &VersionSpec::Latest).unwrap(),
            Version::new(1, 3, 0)
        );
        assert_eq!(
            resolve_spec(&entry, &VersionSpec::Tag("next".into()))
                .unwrap()
                .to_string(),
            "2.0.0-rc.1"
        );
        assert!(matches!(
            resolve_spec(&entry, &VersionSpec::Tag("beta".into())),
            Err(HeyError::UnknownDistTag { .. })
        ));
    }

    #[test]
    fn test_resolve_spec_bad_tag_target() {
        let entry =
            RegistryEntry::from_json("demo", &json!({ "dist-tags": { "latest": "banana" } }));
        assert!(matches!(
            resolve_spec(&entry, &VersionSpec::Latest),
            Err(HeyError::MissingVersionData(_))
        ));
    }
}
