//! Domain types - versions, release identifiers and change sections

pub mod changes;
pub mod prerelease;
pub mod release;
pub mod tag_order;
pub mod version;

pub use changes::{Category, ChangeEntry, Changes};
pub use prerelease::{Identifier, PreRelease};
pub use release::{VersionId, VersionQuery};
pub use tag_order::TagOrder;
pub use version::{SemanticVersion, VersionComponents};
