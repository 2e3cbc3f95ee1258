//! Command-line glue around the parsing core

pub mod orchestration;

/// Undo shell escaping of newlines in text passed on the command line.
///
/// Windows shells hand over `\n` as two literal characters; elsewhere the
/// text is returned untouched.
pub fn correct_option(text: &str) -> String {
    if cfg!(windows) {
        text.replace("\\n", "\n")
    } else {
        text.to_string()
    }
}
