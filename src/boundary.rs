use crate::changelog::Changelog;
use crate::domain::VersionId;
use std::fmt;

/// Warnings about a changelog's link bookkeeping.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A link was requested but the release has none
    MissingLink { version: String },
    /// A link definition names a release that has no heading
    OrphanLink { version: String, url: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MissingLink { version } => {
                write!(f, "No link found for version '{}'", version)
            }
            BoundaryWarning::OrphanLink { version, url } => {
                write!(
                    f,
                    "Link for version '{}' has no matching release heading ({})",
                    version, url
                )
            }
        }
    }
}

/// Collect the warnings relevant to extracting `version` from `changelog`.
pub fn collect_warnings(
    changelog: &Changelog,
    version: &VersionId,
    link_requested: bool,
) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if link_requested && changelog.link_for(version).is_none() {
        warnings.push(BoundaryWarning::MissingLink {
            version: version.to_string(),
        });
    }

    warnings.extend(
        changelog
            .orphan_links()
            .into_iter()
            .map(|(version, url)| BoundaryWarning::OrphanLink {
                version: version.to_string(),
                url: url.to_string(),
            }),
    );

    warnings
}
