//! Main workflow orchestration logic
//!
//! Locates and parses the changelog, then renders the requested release.
//! Decoupled from clap so the workflow can be driven programmatically.

use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::{self, BoundaryWarning};
use crate::changelog::Changelog;
use crate::config::Config;
use crate::domain::{TagOrder, VersionId};
use crate::error::Result;
use crate::ui;

/// Where to find the changelog
///
/// `dir` and `path` are mutually exclusive; with neither, the configured
/// file name is looked up in the working directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangelogLocation {
    /// Directory containing the changelog file
    pub dir: Option<PathBuf>,

    /// Full path to the changelog, for non-standard file names
    pub path: Option<PathBuf>,
}

impl ChangelogLocation {
    /// Resolve the changelog file path.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        match (&self.dir, &self.path) {
            (Some(dir), _) => dir.join(file_name),
            (None, Some(path)) => path.clone(),
            (None, None) => PathBuf::from(file_name),
        }
    }
}

/// Arguments for the extract workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractArgs {
    /// Release to extract
    pub version: VersionId,

    pub location: ChangelogLocation,

    /// Category output order
    pub tag_order: TagOrder,

    /// Text written before the changes
    pub prepend: Option<String>,

    /// Append the release's reference link
    pub add_link: bool,

    /// Emit the structured JSON record instead of Markdown
    pub json: bool,
}

/// Result of a successful extract workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractResult {
    /// The changelog that was read
    pub changelog_path: PathBuf,

    /// Rendered output, ready to be written
    pub output: String,

    /// Non-fatal issues found along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Read and parse the changelog at `path`.
pub fn load_changelog(path: &Path) -> Result<Changelog> {
    let text = fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "parsing changelog");
    Changelog::parse(&text)
}

/// Extract one release from the changelog.
///
/// # Returns
/// * `Ok(ExtractResult)` - rendered output and warnings
/// * `Err` - if the changelog cannot be read or parsed, or the release is missing
pub fn run_extract(args: &ExtractArgs, config: &Config) -> Result<ExtractResult> {
    let changelog_path = args.location.resolve(&config.changelog_file);
    let changelog = load_changelog(&changelog_path)?;

    let output = if args.json {
        serde_json::to_string_pretty(&changelog.release(&args.version)?)?
    } else {
        let changes = changelog.get(&args.version)?;
        let link_line = args
            .add_link
            .then(|| ui::format_link_line(&args.version, changelog.link_for(&args.version)));
        ui::render_changes(
            changes,
            &args.tag_order,
            args.prepend.as_deref(),
            link_line.as_deref(),
        )
    };
    tracing::info!(version = %args.version, "extracted release");

    let warnings = boundary::collect_warnings(&changelog, &args.version, args.add_link);

    Ok(ExtractResult {
        changelog_path,
        output,
        warnings,
    })
}

/// List every release of the changelog in document order.
pub fn run_list(location: &ChangelogLocation, config: &Config) -> Result<String> {
    let changelog = load_changelog(&location.resolve(&config.changelog_file))?;
    Ok(ui::format_version_list(changelog.versions()))
}
