//! User interface module - output destinations and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing rendered output to stdout or a file

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_success, format_link_line, format_version_list,
    render_changes,
};

/// Write rendered output to `path`, or to stdout when no path is given.
///
/// The text is written as is; no newline is appended.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text)?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote changes");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
