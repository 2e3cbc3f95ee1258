//! Pre-release identifiers and their precedence
//!
//! Implements the ordering rules of https://semver.org/#spec-item-11:
//! identifiers are compared left to right, numeric identifiers compare
//! numerically and rank below alphanumeric ones, and a shorter list ranks
//! below a longer one when all shared identifiers are equal.

use crate::error::{ChangelogError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single dot-separated pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Digits only, never with a leading zero. Kept as text so that
    /// arbitrarily long numbers still compare correctly.
    Numeric(String),
    /// Any other mix of `[0-9A-Za-z-]`
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse a single identifier
    ///
    /// # Returns
    /// * `Ok(Identifier)` - Classified identifier
    /// * `Err` - If empty, containing characters outside `[0-9A-Za-z-]`,
    ///   or numeric with a leading zero
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Numeric(s) | Identifier::AlphaNumeric(s) => s,
        }
    }
}

impl FromStr for Identifier {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ChangelogError::invalid_version(s));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            if s.len() > 1 && s.starts_with('0') {
                return Err(ChangelogError::invalid_version(s));
            }
            Ok(Identifier::Numeric(s.to_string()))
        } else {
            Ok(Identifier::AlphaNumeric(s.to_string()))
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // no leading zeros, so the longer digit string is the larger number
            (Identifier::Numeric(a), Identifier::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-release part of a version, e.g. "alpha.1" or "0.3.7"
///
/// An empty pre-release means a normal release, which ranks above every
/// pre-release of the same core version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PreRelease {
    identifiers: Vec<Identifier>,
    // dot-joined identifiers, kept so callers can borrow the text
    text: String,
}

impl PreRelease {
    /// The pre-release of a normal release
    pub const EMPTY: PreRelease = PreRelease {
        identifiers: Vec::new(),
        text: String::new(),
    };

    /// Parse a dot-separated pre-release string
    ///
    /// An empty string yields [`PreRelease::EMPTY`].
    ///
    /// # Examples
    /// ```ignore
    /// let pr = PreRelease::parse("beta.11")?;
    /// assert_eq!(pr.identifiers().len(), 2);
    /// assert!(PreRelease::parse("alpha.01").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(PreRelease::EMPTY);
        }

        let identifiers = s
            .split('.')
            .map(Identifier::parse)
            .collect::<Result<Vec<_>>>()
            .map_err(|_| ChangelogError::invalid_version(s))?;

        Ok(PreRelease {
            identifiers,
            text: s.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// The pre-release as written, e.g. "beta.11"
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for PreRelease {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        PreRelease::parse(s)
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // lexicographic: first differing identifier decides, otherwise
            // the shorter list sorts first
            (false, false) => self.identifiers.cmp(&other.identifiers),
        }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
