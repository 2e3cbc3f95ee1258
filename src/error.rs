use thiserror::Error;

/// Unified error type for changelog-handler operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Invalid semantic version: '{0}'")]
    InvalidVersion(String),

    #[error("No versions found in changelog")]
    NoVersions,

    #[error("Unparseable change block near '{0}'")]
    UnparseableBlock(String),

    #[error("Unable to parse changes for version {version}: unexpected line '{line}'")]
    UnparseableChanges { version: String, line: String },

    #[error("Version {0} appears more than once in changelog")]
    DuplicateVersion(String),

    #[error("Version ({0}) not found in changelog")]
    VersionNotFound(String),

    #[error("Unknown change category: '{0}'")]
    UnknownCategory(String),

    #[error("Change category '{0}' specified more than once")]
    DuplicateCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in changelog-handler
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create an invalid version error for the offending input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        ChangelogError::InvalidVersion(input.into())
    }

    /// Create an unparseable change block error
    pub fn unparseable(version: impl ToString, line: impl Into<String>) -> Self {
        ChangelogError::UnparseableChanges {
            version: version.to_string(),
            line: line.into(),
        }
    }

    /// Attach the release a change block belongs to
    pub fn in_release(self, version: impl ToString) -> Self {
        match self {
            ChangelogError::UnparseableBlock(line) => ChangelogError::unparseable(version, line),
            other => other,
        }
    }
}
