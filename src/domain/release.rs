use crate::domain::version::SemanticVersion;
use crate::error::Result;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Identifies one release section of a changelog.
///
/// `Unreleased` equals only itself and ranks above every released version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionId {
    Released(SemanticVersion),
    Unreleased,
}

impl VersionId {
    /// Parse a version token: "unreleased" in any case, otherwise a SemVer string.
    pub fn parse(input: &str) -> Result<Self> {
        if input.eq_ignore_ascii_case("unreleased") {
            return Ok(VersionId::Unreleased);
        }
        SemanticVersion::parse(input).map(VersionId::Released)
    }

    pub fn is_unreleased(&self) -> bool {
        matches!(self, VersionId::Unreleased)
    }

    /// The concrete version, if this is a released section
    pub fn semantic(&self) -> Option<&SemanticVersion> {
        match self {
            VersionId::Released(version) => Some(version),
            VersionId::Unreleased => None,
        }
    }
}

impl From<SemanticVersion> for VersionId {
    fn from(version: SemanticVersion) -> Self {
        VersionId::Released(version)
    }
}

impl From<&SemanticVersion> for VersionId {
    fn from(version: &SemanticVersion) -> Self {
        VersionId::Released(version.clone())
    }
}

impl From<&VersionId> for VersionId {
    fn from(version: &VersionId) -> Self {
        version.clone()
    }
}

impl FromStr for VersionId {
    type Err = crate::error::ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        VersionId::parse(s)
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (VersionId::Released(a), VersionId::Released(b)) => a.cmp(b),
            (VersionId::Released(_), VersionId::Unreleased) => Ordering::Less,
            (VersionId::Unreleased, VersionId::Released(_)) => Ordering::Greater,
            (VersionId::Unreleased, VersionId::Unreleased) => Ordering::Equal,
        }
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<SemanticVersion> for VersionId {
    fn eq(&self, other: &SemanticVersion) -> bool {
        self.semantic() == Some(other)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionId::Released(version) => write!(f, "{}", version),
            VersionId::Unreleased => f.write_str("Unreleased"),
        }
    }
}

impl Serialize for VersionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Anything a changelog can be queried with.
///
/// Implemented for version strings and already parsed versions. Converting a
/// string may fail with an invalid version error before any lookup happens.
pub trait VersionQuery {
    fn to_version_id(&self) -> Result<VersionId>;
}

impl VersionQuery for str {
    fn to_version_id(&self) -> Result<VersionId> {
        VersionId::parse(self)
    }
}

impl VersionQuery for String {
    fn to_version_id(&self) -> Result<VersionId> {
        VersionId::parse(self)
    }
}

impl VersionQuery for SemanticVersion {
    fn to_version_id(&self) -> Result<VersionId> {
        Ok(VersionId::Released(self.clone()))
    }
}

impl VersionQuery for VersionId {
    fn to_version_id(&self) -> Result<VersionId> {
        Ok(self.clone())
    }
}

impl<T: VersionQuery + ?Sized> VersionQuery for &T {
    fn to_version_id(&self) -> Result<VersionId> {
        (**self).to_version_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn released(s: &str) -> VersionId {
        VersionId::Released(SemanticVersion::parse(s).unwrap())
    }

    #[test]
    fn test_parse_unreleased_any_case() {
        for input in ["unreleased", "Unreleased", "UNRELEASED", "uNrElEaSeD"] {
            assert_eq!(VersionId::parse(input).unwrap(), VersionId::Unreleased);
        }
    }

    #[test]
    fn test_parse_released() {
        assert_eq!(VersionId::parse("v1.2.3").unwrap(), released("1.2.3"));
        assert!(VersionId::parse("1.2").is_err());
        assert!(VersionId::parse("unreleased-1").is_err());
    }

    #[test]
    fn test_unreleased_is_newest() {
        for s in ["0.0.1", "1.0.0-rc.1", "999999.999999.999999"] {
            assert!(VersionId::Unreleased > released(s));
            assert!(released(s) < VersionId::Unreleased);
        }
    }

    #[test]
    fn test_unreleased_equals_only_itself() {
        assert_eq!(VersionId::Unreleased, VersionId::Unreleased);
        assert_ne!(VersionId::Unreleased, released("0.0.0"));
        assert_eq!(
            VersionId::Unreleased.cmp(&VersionId::Unreleased),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_puts_unreleased_last() {
        let mut ids = vec![
            VersionId::Unreleased,
            released("1.1.1"),
            released("1.0.0"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![released("1.0.0"), released("1.1.1"), VersionId::Unreleased]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionId::Unreleased.to_string(), "Unreleased");
        assert_eq!(released("v1.0.0+meta").to_string(), "1.0.0+meta");
    }

    #[test]
    fn test_query_conversions() {
        let version = SemanticVersion::parse("1.0.0").unwrap();
        assert_eq!("1.0.0".to_version_id().unwrap(), released("1.0.0"));
        assert_eq!(
            String::from("unreleased").to_version_id().unwrap(),
            VersionId::Unreleased
        );
        assert_eq!(version.to_version_id().unwrap(), released("1.0.0"));
        assert_eq!((&version).to_version_id().unwrap(), released("1.0.0"));
        assert!("not-a-version".to_version_id().is_err());
    }

    #[test]
    fn test_compare_with_semantic_version() {
        let version = SemanticVersion::parse("2.0.0").unwrap();
        assert!(released("2.0.0+build") == version);
        assert!(VersionId::Unreleased != version);
    }
}
