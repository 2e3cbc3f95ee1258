pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod pattern;
pub mod ui;

pub use changelog::{Changelog, ReleaseRecord, StructuredChangelog};
pub use domain::{Category, ChangeEntry, Changes, SemanticVersion, VersionId, VersionQuery};
pub use error::{ChangelogError, Result};
