//! Changelog document parsing and queries
//!
//! Parsing is a single pass over the lines of the document:
//!
//! 1. Link definition lines (`[1.0.0]: url`) are recorded wherever they
//!    appear and never become part of a release body.
//! 2. Until the first release heading, every other line is skipped.
//! 3. After that, each release heading seals the accumulated body of the
//!    previous release and opens a new one.
//! 4. End of input seals the last release.

use crate::domain::changes::serialize_or_empty;
use crate::domain::{Changes, VersionComponents, VersionId, VersionQuery};
use crate::error::{ChangelogError, Result};
use crate::pattern::{self, LinkDefinition, ReleaseHeading};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A parsed Keep a Changelog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    versions: Vec<VersionId>,
    changes: HashMap<VersionId, Changes>,
    links: HashMap<VersionId, String>,
}

/// Structured view of one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Numeric components; `None` for the unreleased section, written as `{}`
    #[serde(serialize_with = "serialize_or_empty")]
    pub version: Option<VersionComponents>,
    /// Link target, empty when the release has none
    pub link: String,
    pub changes: Changes,
}

/// Structured view of a whole document, keyed by version string in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredChangelog {
    pub releases: Vec<(String, ReleaseRecord)>,
}

impl Serialize for StructuredChangelog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.releases.len()))?;
        for (version, record) in &self.releases {
            map.serialize_entry(version, record)?;
        }
        map.end()
    }
}

enum ParseState {
    SeekingFirstVersion,
    InBody { current: VersionId, body: String },
}

impl Changelog {
    /// Parse the complete text of a changelog.
    ///
    /// # Errors
    /// * `NoVersions` - no release heading anywhere in the text
    /// * `UnparseableChanges` - a release body holds text outside a category section
    /// * `DuplicateVersion` - two headings name the same release
    /// * `InvalidVersion` - a heading or link line carries a malformed version
    pub fn parse(text: &str) -> Result<Self> {
        let mut changelog = Changelog {
            versions: Vec::new(),
            changes: HashMap::new(),
            links: HashMap::new(),
        };
        let mut state = ParseState::SeekingFirstVersion;

        for line in text.split_inclusive('\n') {
            if let Some(link) = pattern::match_link_definition(line)? {
                changelog.record_link(link);
                continue;
            }

            let heading = pattern::match_release_heading(line)?;
            state = match (state, heading) {
                (ParseState::SeekingFirstVersion, None) => ParseState::SeekingFirstVersion,
                (ParseState::SeekingFirstVersion, Some(heading)) => ParseState::InBody {
                    current: changelog.open_release(heading)?,
                    body: String::new(),
                },
                (ParseState::InBody { current, body }, Some(heading)) => {
                    changelog.seal(current, &body)?;
                    ParseState::InBody {
                        current: changelog.open_release(heading)?,
                        body: String::new(),
                    }
                }
                (ParseState::InBody { current, mut body }, None) => {
                    body.push_str(line);
                    ParseState::InBody { current, body }
                }
            };
        }

        match state {
            ParseState::SeekingFirstVersion => Err(ChangelogError::NoVersions),
            ParseState::InBody { current, body } => {
                changelog.seal(current, &body)?;
                Ok(changelog)
            }
        }
    }

    fn record_link(&mut self, link: LinkDefinition) {
        tracing::debug!(version = %link.version, url = %link.url, "found link definition");
        self.links.insert(link.version, link.url);
    }

    fn open_release(&mut self, heading: ReleaseHeading) -> Result<VersionId> {
        if self.versions.contains(&heading.version) {
            return Err(ChangelogError::DuplicateVersion(heading.version.to_string()));
        }

        tracing::debug!(
            version = %heading.version,
            date = heading.date.as_deref().unwrap_or("-"),
            "found release heading"
        );
        if let Some(url) = heading.url {
            self.links.insert(heading.version.clone(), url);
        }
        self.versions.push(heading.version.clone());
        Ok(heading.version)
    }

    fn seal(&mut self, version: VersionId, body: &str) -> Result<()> {
        let changes = Changes::parse(body.trim()).map_err(|e| e.in_release(&version))?;
        self.changes.insert(version, changes);
        Ok(())
    }

    /// Release identifiers in document order
    pub fn versions(&self) -> &[VersionId] {
        &self.versions
    }

    /// Changes recorded for a release
    ///
    /// # Errors
    /// * `InvalidVersion` - the query string is not a version
    /// * `VersionNotFound` - the release has no heading in this document
    pub fn get<Q: VersionQuery>(&self, query: Q) -> Result<&Changes> {
        let version = query.to_version_id()?;
        self.changes
            .get(&version)
            .ok_or_else(|| ChangelogError::VersionNotFound(version.to_string()))
    }

    /// Whether the document has a heading for the release
    pub fn contains<Q: VersionQuery>(&self, query: Q) -> Result<bool> {
        let version = query.to_version_id()?;
        Ok(self.versions.contains(&version))
    }

    /// Link target recorded for a release, from its heading or a link definition
    ///
    /// Accepts a `VersionId` (owned or borrowed) or a `SemanticVersion`.
    pub fn link_for<V: Into<VersionId>>(&self, version: V) -> Option<&str> {
        self.links.get(&version.into()).map(String::as_str)
    }

    /// All recorded links, including ones for releases without a heading
    pub fn links(&self) -> &HashMap<VersionId, String> {
        &self.links
    }

    /// Link definitions whose release never appears as a heading, sorted newest first
    pub fn orphan_links(&self) -> Vec<(&VersionId, &str)> {
        let mut orphans: Vec<(&VersionId, &str)> = self
            .links
            .iter()
            .filter(|(version, _)| !self.versions.contains(version))
            .map(|(version, url)| (version, url.as_str()))
            .collect();
        orphans.sort_by(|a, b| b.0.cmp(a.0));
        orphans
    }

    /// Structured record of one release
    pub fn release<Q: VersionQuery>(&self, query: Q) -> Result<ReleaseRecord> {
        let version = query.to_version_id()?;
        let changes = self.get(&version)?;

        Ok(ReleaseRecord {
            version: version.semantic().map(|v| v.components()),
            link: self.link_for(&version).unwrap_or_default().to_string(),
            changes: changes.clone(),
        })
    }

    /// Structured record of every release, in document order
    pub fn to_structured(&self) -> Result<StructuredChangelog> {
        let releases = self
            .versions
            .iter()
            .map(|version| Ok((version.to_string(), self.release(version)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(StructuredChangelog { releases })
    }
}
