use crate::domain::prerelease::PreRelease;
use crate::error::{ChangelogError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

/// SemVer grammar without captures, for embedding in line recognizers.
pub(crate) const SEMVER_GRAMMAR: &str = r"[0-9]+\.[0-9]+\.[0-9]+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?";

static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[Vv]?(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<patch>[0-9]+)(?:-(?P<pre>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+(?P<build>[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("semver grammar is a valid regex")
});

/// Semantic version per SemVer 2.0.0
///
/// Equality, hashing and ordering ignore build metadata.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: PreRelease,
    build: String,
}

/// Plain numeric/textual view of a version, used for structured output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionComponents {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: String,
    pub build_metadata: String,
}

impl SemanticVersion {
    /// Parse a version string such as "1.2.3", "v0.1.0-rc.1" or "1.0.0+20130313144700".
    ///
    /// A single leading 'v' or 'V' is accepted and dropped. The rest must match
    /// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` exactly, and numeric
    /// pre-release identifiers must not carry a leading zero.
    pub fn parse(input: &str) -> Result<Self> {
        let captures = SEMVER
            .captures(input)
            .ok_or_else(|| ChangelogError::invalid_version(input))?;

        let number = |name: &str| -> Result<u64> {
            captures[name]
                .parse::<u64>()
                .map_err(|_| ChangelogError::invalid_version(input))
        };
        let major = number("major")?;
        let minor = number("minor")?;
        let patch = number("patch")?;

        let pre_release = match captures.name("pre") {
            Some(m) => {
                PreRelease::parse(m.as_str()).map_err(|_| ChangelogError::invalid_version(input))?
            }
            None => PreRelease::EMPTY,
        };
        let build = captures
            .name("build")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre_release,
            build,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Pre-release string, empty for a normal release
    pub fn pre_release(&self) -> &str {
        self.pre_release.as_str()
    }

    /// Build metadata string, empty when absent
    pub fn build_metadata(&self) -> &str {
        &self.build
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    pub fn components(&self) -> VersionComponents {
        VersionComponents {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre_release: self.pre_release().to_string(),
            build_metadata: self.build.clone(),
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre_release == other.pre_release
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| self.pre_release.cmp(&other.pre_release))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_version_parse() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.pre_release(), "");
        assert_eq!(version.build_metadata(), "");
    }

    #[test]
    fn test_version_pre_release_text() {
        let version = v("1.0.0-beta.11+exp.sha.5114f85");
        let text: &str = version.pre_release();
        assert_eq!(text, "beta.11");
        assert_eq!(version.components().pre_release, "beta.11");
    }

    #[test]
    fn test_version_parse_with_prefix() {
        assert_eq!(v("v0.1.2").to_string(), "0.1.2");
        assert_eq!(v("V2.0.5").to_string(), "2.0.5");
    }

    #[test]
    fn test_version_parse_components() {
        let cases = [
            ("1.0.0-alpha", 1, 0, 0, "alpha", ""),
            ("1.0.0-alpha.1", 1, 0, 0, "alpha.1", ""),
            ("1.0.0-0.3.7", 1, 0, 0, "0.3.7", ""),
            ("1.0.0-x.7.z.92", 1, 0, 0, "x.7.z.92", ""),
            ("1.0.0-x-y-z.--", 1, 0, 0, "x-y-z.--", ""),
            ("1.0.0-alpha+001", 1, 0, 0, "alpha", "001"),
            ("1.0.0+20130313144700", 1, 0, 0, "", "20130313144700"),
            ("1.0.0-beta+exp.sha.5114f85", 1, 0, 0, "beta", "exp.sha.5114f85"),
            ("1.0.0+21AF26D3----117B344092BD", 1, 0, 0, "", "21AF26D3----117B344092BD"),
        ];

        for (input, major, minor, patch, pre, build) in cases {
            let parsed = v(input);
            assert_eq!(
                parsed.components(),
                VersionComponents {
                    major,
                    minor,
                    patch,
                    pre_release: pre.to_string(),
                    build_metadata: build.to_string(),
                },
                "parsing {}",
                input
            );
        }
    }

    #[test]
    fn test_version_parse_invalid() {
        for input in [
            "1.0",
            "1..0",
            "1.2.3alpha",
            "1.0.0-",
            "1.0.0+",
            "1.2.3.4",
            "vv1.2.3",
            " 1.2.3",
            "1.2.3 ",
            "release-1.2.3",
            "1.2.3-alpha+1234 blah",
            "unreleased",
        ] {
            assert!(
                matches!(
                    SemanticVersion::parse(input),
                    Err(ChangelogError::InvalidVersion(_))
                ),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_version_parse_leading_zero_prerelease() {
        assert!(SemanticVersion::parse("1.0.0-01").is_err());
        assert!(SemanticVersion::parse("1.0.0-alpha.023").is_err());
        assert!(SemanticVersion::parse("1.0.0-0").is_ok());
    }

    #[test]
    fn test_version_parse_overflow() {
        assert!(SemanticVersion::parse("99999999999999999999999.0.0").is_err());
    }

    #[test]
    fn test_version_display_round_trip() {
        for input in ["1.2.3", "v1.0.0-rc.1+build.5", "0.0.1+exp"] {
            let parsed = v(input);
            let reparsed = v(&parsed.to_string());
            assert_eq!(parsed, reparsed);
            assert_eq!(parsed.build_metadata(), reparsed.build_metadata());
        }
    }

    #[test]
    fn test_equality_ignores_build_metadata() {
        assert_eq!(v("1.0.0+ABD-123"), v("1.0.0"));
        assert_eq!(v("1.0.0-alpha+dev2"), v("1.0.0-alpha"));
        assert_ne!(v("1.0.0-alpha"), v("1.0.0"));
        assert_eq!(v("1.0.0+a").cmp(&v("1.0.0+b")), Ordering::Equal);
    }

    #[test]
    fn test_hash_ignores_build_metadata() {
        let mut set = HashSet::new();
        set.insert(v("1.0.0+first"));
        assert!(set.contains(&v("1.0.0+second")));
        assert!(set.contains(&v("v1.0.0")));
        assert!(!set.contains(&v("1.0.0-rc.1")));
    }

    #[test]
    fn test_semver_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "1.0.1",
            "1.1.0",
            "1.1.1",
        ];

        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
            assert!(v(pair[1]) > v(pair[0]), "{} > {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_sorting_mixed_versions() {
        let mut versions: Vec<SemanticVersion> = [
            "1.1.1",
            "1.0.0-rc.1",
            "1.0.1-alpha.beta",
            "1.0.0",
            "1.0.0-rc+5F23C7",
            "1.0.0-alpha",
        ]
        .iter()
        .map(|s| v(s))
        .collect();
        versions.sort();

        let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            sorted,
            vec![
                "1.0.0-alpha",
                "1.0.0-rc+5F23C7",
                "1.0.0-rc.1",
                "1.0.0",
                "1.0.1-alpha.beta",
                "1.1.1",
            ]
        );
    }

    #[test]
    fn test_numeric_core_compares_numerically() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("10.0.0") > v("9.99.99"));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&v("v1.2.3-rc.1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
    }
}
