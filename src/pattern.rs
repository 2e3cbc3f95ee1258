//! Line recognizers for the Keep a Changelog layout
//!
//! Each recognizer looks at a single line (or, for category headings, the
//! text at the current cursor) and returns a structured match or `None`.
//! The release and link recognizers return `Err` only when the line has the
//! right shape but its version token fails the stricter SemVer checks, such
//! as a pre-release identifier with a leading zero.

use crate::domain::changes::Category;
use crate::domain::release::VersionId;
use crate::domain::version::{SemanticVersion, SEMVER_GRAMMAR};
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

const DATE: &str = r"(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})";
const INLINE_URL: &str = r"(?:\s*\((?P<url>.+)\))?";

/// `## [Unreleased]`, `## Unreleased`, optionally with an inline link. No date required.
static UNRELEASED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^##\s+(?:\[[Uu]nreleased\]|[Uu]nreleased){INLINE_URL}"
    ))
    .expect("unreleased heading pattern is a valid regex")
});

/// `## [1.2.3](url) - 2023-01-01`, `## [1.2.3] - 2023-01-01`, `## 1.2.3 - 2023-01-01`
static RELEASE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^##\s+(?:\[[Vv]?(?P<bracketed>{SEMVER_GRAMMAR})\]|[Vv]?(?P<bare>{SEMVER_GRAMMAR})){INLINE_URL}\s+-\s+{DATE}"
    ))
    .expect("release heading pattern is a valid regex")
});

/// `[1.2.3]: url` or `[unreleased]: url`
static LINK_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\[(?:(?P<unreleased>(?i:unreleased))|[Vv]?(?P<version>{SEMVER_GRAMMAR}))\]:\s+(?P<url>\S.*)"
    ))
    .expect("link definition pattern is a valid regex")
});

/// `### Added`, `### fixed in this release`, ...
static CATEGORY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###[ \t]+(?P<name>(?i:added|changed|deprecated|removed|fixed|security))")
        .expect("category heading pattern is a valid regex")
});

/// A level-2 heading announcing a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeading {
    pub version: VersionId,
    /// Inline link target, e.g. the `url` in `## [1.0.0](url) - 2020-01-01`
    pub url: Option<String>,
    /// Release date as written; absent for unreleased headings
    pub date: Option<String>,
}

/// A reference-style link definition naming a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    pub version: VersionId,
    pub url: String,
}

/// A level-3 heading opening one change category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryHeading<'a> {
    pub category: Category,
    /// The whole heading line as written, including its line terminator
    pub heading: &'a str,
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Recognize a release heading line.
///
/// The `##` marker must be followed by whitespace, so `###` headings never
/// match. Released versions must be followed by ` - YYYY-MM-DD`; the
/// unreleased section needs no date. Trailing text after the match is ignored.
pub fn match_release_heading(line: &str) -> Result<Option<ReleaseHeading>> {
    let line = strip_terminator(line);

    if let Some(captures) = UNRELEASED_HEADING.captures(line) {
        return Ok(Some(ReleaseHeading {
            version: VersionId::Unreleased,
            url: captures.name("url").map(|m| m.as_str().to_string()),
            date: None,
        }));
    }

    let Some(captures) = RELEASE_HEADING.captures(line) else {
        return Ok(None);
    };

    let token = captures
        .name("bracketed")
        .or_else(|| captures.name("bare"))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let version = SemanticVersion::parse(token)?;

    Ok(Some(ReleaseHeading {
        version: VersionId::Released(version),
        url: captures.name("url").map(|m| m.as_str().to_string()),
        date: captures.name("date").map(|m| m.as_str().to_string()),
    }))
}

/// Recognize a `[VERSION]: URL` link definition line.
///
/// Only labels that are a version or "unreleased" count; other reference
/// links such as `[docs]: ...` are left alone.
pub fn match_link_definition(line: &str) -> Result<Option<LinkDefinition>> {
    let line = strip_terminator(line);

    let Some(captures) = LINK_DEFINITION.captures(line) else {
        return Ok(None);
    };

    let version = match captures.name("version") {
        Some(m) => VersionId::Released(SemanticVersion::parse(m.as_str())?),
        None => VersionId::Unreleased,
    };
    let url = captures
        .name("url")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Ok(Some(LinkDefinition { version, url }))
}

/// Recognize a category heading at the start of `text`.
///
/// The category is decided by the leading word only; anything after it on
/// the same line stays part of the raw heading.
pub fn match_category_heading(text: &str) -> Option<CategoryHeading<'_>> {
    let captures = CATEGORY_HEADING.captures(text)?;
    let category = captures.name("name")?.as_str().parse::<Category>().ok()?;
    let heading_end = text.find('\n').map_or(text.len(), |i| i + 1);

    Some(CategoryHeading {
        category,
        heading: &text[..heading_end],
    })
}

/// Whether a line opens a heading of level two or deeper.
pub fn is_section_boundary(line: &str) -> bool {
    line.starts_with("##")
}
