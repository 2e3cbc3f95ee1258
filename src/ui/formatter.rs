//! Pure formatting functions for UI output.
//!
//! Rendering of extracted changes is kept free of I/O so it can be tested
//! directly; the `display_*` helpers only print to stderr, leaving stdout
//! for the extracted changes themselves.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{Changes, TagOrder, VersionId};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Format the reference link appended after the changes.
///
/// The URL is left empty when the release has no link.
pub fn format_link_line(version: &VersionId, url: Option<&str>) -> String {
    format!("\n\n[{}]: {}", version, url.unwrap_or_default())
}

/// Render the changes of one release as Markdown.
///
/// Non-empty categories are written in `order`, each as its raw heading
/// followed by its raw content. `prepend` comes first and `link_line` last;
/// no trailing newline is added.
///
/// # Example
/// ```ignore
/// let text = render_changes(&changes, &TagOrder::default(), Some("# v1.0.0\n"), None);
/// assert!(text.starts_with("# v1.0.0\n### Added\n"));
/// ```
pub fn render_changes(
    changes: &Changes,
    order: &TagOrder,
    prepend: Option<&str>,
    link_line: Option<&str>,
) -> String {
    let mut output = String::new();

    if let Some(prepend) = prepend {
        output.push_str(prepend);
    }

    for category in order.iter() {
        if let Some(entry) = changes.get(category) {
            output.push_str(&entry.heading);
            output.push_str(&entry.content);
        }
    }

    if let Some(link_line) = link_line {
        output.push_str(link_line);
    }

    output
}

/// Format the release list printed by `--list`, one version per line.
pub fn format_version_list(versions: &[VersionId]) -> String {
    versions
        .iter()
        .map(|version| format!("{}\n", version))
        .collect()
}
