//! Change categories and the per-release change sections
//!
//! A release body is sealed into [`Changes`] by walking a cursor over the
//! text: each step must sit on a `### <category>` heading, and the section
//! runs until the next line opening a `##`-or-deeper heading.

use crate::error::{ChangelogError, Result};
use crate::pattern;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the six Keep a Changelog change types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 6] = [
        Category::Added,
        Category::Changed,
        Category::Deprecated,
        Category::Removed,
        Category::Fixed,
        Category::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "added",
            Category::Changed => "changed",
            Category::Deprecated => "deprecated",
            Category::Removed => "removed",
            Category::Fixed => "fixed",
            Category::Security => "security",
        }
    }
}

impl FromStr for Category {
    type Err = ChangelogError;

    /// Case-insensitive exact match against the six names
    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChangelogError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text of one category section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    /// Heading line as written, e.g. "### Added\n"
    pub heading: String,
    /// Everything after the heading line up to the next heading, verbatim
    pub content: String,
}

/// The six change sections of one release; empty slots are `None`
/// and serialize as an empty map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changes {
    #[serde(serialize_with = "serialize_or_empty")]
    added: Option<ChangeEntry>,
    #[serde(serialize_with = "serialize_or_empty")]
    changed: Option<ChangeEntry>,
    #[serde(serialize_with = "serialize_or_empty")]
    deprecated: Option<ChangeEntry>,
    #[serde(serialize_with = "serialize_or_empty")]
    removed: Option<ChangeEntry>,
    #[serde(serialize_with = "serialize_or_empty")]
    fixed: Option<ChangeEntry>,
    #[serde(serialize_with = "serialize_or_empty")]
    security: Option<ChangeEntry>,
}

impl Changes {
    /// Seal the body of a release into its category sections.
    ///
    /// The text must consist solely of category sections; an empty text
    /// yields empty `Changes`. When a category repeats, the later section
    /// replaces the earlier one.
    ///
    /// # Returns
    /// * `Err(ChangelogError::UnparseableBlock)` - with the first line that
    ///   is not covered by a recognized category heading
    pub fn parse(text: &str) -> Result<Self> {
        let mut changes = Changes::default();
        let mut rest = text;

        while !rest.is_empty() {
            let heading = pattern::match_category_heading(rest).ok_or_else(|| {
                let line = rest.lines().next().unwrap_or_default();
                ChangelogError::UnparseableBlock(line.to_string())
            })?;

            let body = &rest[heading.heading.len()..];
            let content_len = section_length(body);
            let content = &body[..content_len];

            tracing::trace!(category = %heading.category, bytes = content.len(), "sealed change section");
            *changes.slot_mut(heading.category) = Some(ChangeEntry {
                heading: heading.heading.to_string(),
                content: content.to_string(),
            });

            // the heading is never empty, so the cursor always advances
            rest = &body[content_len..];
        }

        Ok(changes)
    }

    pub fn get(&self, category: Category) -> Option<&ChangeEntry> {
        match category {
            Category::Added => self.added.as_ref(),
            Category::Changed => self.changed.as_ref(),
            Category::Deprecated => self.deprecated.as_ref(),
            Category::Removed => self.removed.as_ref(),
            Category::Fixed => self.fixed.as_ref(),
            Category::Security => self.security.as_ref(),
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<ChangeEntry> {
        match category {
            Category::Added => &mut self.added,
            Category::Changed => &mut self.changed,
            Category::Deprecated => &mut self.deprecated,
            Category::Removed => &mut self.removed,
            Category::Fixed => &mut self.fixed,
            Category::Security => &mut self.security,
        }
    }

    pub fn added(&self) -> Option<&ChangeEntry> {
        self.added.as_ref()
    }

    pub fn changed(&self) -> Option<&ChangeEntry> {
        self.changed.as_ref()
    }

    pub fn deprecated(&self) -> Option<&ChangeEntry> {
        self.deprecated.as_ref()
    }

    pub fn removed(&self) -> Option<&ChangeEntry> {
        self.removed.as_ref()
    }

    pub fn fixed(&self) -> Option<&ChangeEntry> {
        self.fixed.as_ref()
    }

    pub fn security(&self) -> Option<&ChangeEntry> {
        self.security.as_ref()
    }

    /// Non-empty sections in canonical category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &ChangeEntry)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(move |category| self.get(category).map(|entry| (category, entry)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Serialize `None` as an empty map so every slot of a record stays a mapping.
pub(crate) fn serialize_or_empty<T, S>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Byte length of a section body: up to the first line opening a heading.
fn section_length(body: &str) -> usize {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if pattern::is_section_boundary(line) {
            return offset;
        }
        offset += line.len();
    }
    body.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BLOCK: &str = "### Added

- Arabic translation (#444).
- v1.1 French translation.

### Fixed

- Improve French translation (#377).
- Improve id-ID translation (#416).

### Changed

- Upgrade dependencies: Ruby 3.2.1, Middleman, etc.

### Removed

- Unused normalize.css file

### Deprecated

- blah

### Security

- fixed y2k issues

";

    fn entry(heading: &str, content: &str) -> Option<ChangeEntry> {
        Some(ChangeEntry {
            heading: heading.to_string(),
            content: content.to_string(),
        })
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("added".parse::<Category>().unwrap(), Category::Added);
        assert_eq!("SECURITY".parse::<Category>().unwrap(), Category::Security);
        assert_eq!("Fixed".parse::<Category>().unwrap(), Category::Fixed);
        assert!("add".parse::<Category>().is_err());
        assert!("misc".parse::<Category>().is_err());
        assert!("added ".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display() {
        let names: Vec<String> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["added", "changed", "deprecated", "removed", "fixed", "security"]
        );
    }

    #[test]
    fn test_parse_all_categories() {
        let changes = Changes::parse(FULL_BLOCK).unwrap();

        assert_eq!(
            changes.added().cloned(),
            entry(
                "### Added\n",
                "\n- Arabic translation (#444).\n- v1.1 French translation.\n\n"
            )
        );
        assert_eq!(
            changes.fixed().cloned(),
            entry(
                "### Fixed\n",
                "\n- Improve French translation (#377).\n- Improve id-ID translation (#416).\n\n"
            )
        );
        assert_eq!(
            changes.changed().cloned(),
            entry(
                "### Changed\n",
                "\n- Upgrade dependencies: Ruby 3.2.1, Middleman, etc.\n\n"
            )
        );
        assert_eq!(
            changes.removed().cloned(),
            entry("### Removed\n", "\n- Unused normalize.css file\n\n")
        );
        assert_eq!(
            changes.deprecated().cloned(),
            entry("### Deprecated\n", "\n- blah\n\n")
        );
        assert_eq!(
            changes.security().cloned(),
            entry("### Security\n", "\n- fixed y2k issues\n\n")
        );
    }

    #[test]
    fn test_parse_two_sections_leaves_others_empty() {
        let changes = Changes::parse("### Added\n\n- x\n\n### Fixed\n\n- y\n").unwrap();

        assert_eq!(changes.added().unwrap().content, "\n- x\n\n");
        assert_eq!(changes.fixed().unwrap().content, "\n- y\n");
        assert!(changes.changed().is_none());
        assert!(changes.deprecated().is_none());
        assert!(changes.removed().is_none());
        assert!(changes.security().is_none());
    }

    #[test]
    fn test_parse_empty_text() {
        let changes = Changes::parse("").unwrap();
        assert!(changes.is_empty());
        assert_eq!(changes, Changes::default());
    }

    #[test]
    fn test_parse_heading_with_extra_words() {
        let changes = Changes::parse(
            "### Added extra chars\n\n- Explanation of the recommended reverse chronological release ordering.\n\n",
        )
        .unwrap();
        let added = changes.added().unwrap();
        assert_eq!(added.heading, "### Added extra chars\n");
        assert_eq!(
            added.content,
            "\n- Explanation of the recommended reverse chronological release ordering.\n\n"
        );
    }

    #[test]
    fn test_parse_keeps_non_version_reference_links() {
        let changes = Changes::parse(
            "### Added\n\n- \"Why should I care?\" section.\n\n[link]: google.com\n\n",
        )
        .unwrap();
        assert_eq!(
            changes.added().unwrap().content,
            "\n- \"Why should I care?\" section.\n\n[link]: google.com\n\n"
        );
    }

    #[test]
    fn test_parse_heading_without_body() {
        let changes = Changes::parse("### Fixed").unwrap();
        let fixed = changes.fixed().unwrap();
        assert_eq!(fixed.heading, "### Fixed");
        assert_eq!(fixed.content, "");
    }

    #[test]
    fn test_parse_repeated_category_keeps_last() {
        let changes = Changes::parse("### Added\n- first\n### added again\n- second").unwrap();
        let added = changes.added().unwrap();
        assert_eq!(added.heading, "### added again\n");
        assert_eq!(added.content, "- second");
    }

    #[test]
    fn test_parse_hash_inside_line_is_content() {
        let changes = Changes::parse("### Fixed\n- issue ##12 resolved\n").unwrap();
        assert_eq!(changes.fixed().unwrap().content, "- issue ##12 resolved\n");
    }

    #[test]
    fn test_parse_rejects_leading_prose() {
        let err = Changes::parse("Some intro text\n### Added\n- x\n").unwrap_err();
        assert!(matches!(err, ChangelogError::UnparseableBlock(ref line) if line == "Some intro text"));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let err = Changes::parse("### Added\n- x\n### Misc\n- y\n").unwrap_err();
        assert!(matches!(err, ChangelogError::UnparseableBlock(ref line) if line == "### Misc"));
    }

    #[test]
    fn test_parse_rejects_deeper_subheading() {
        assert!(Changes::parse("### Added\n- x\n#### Details\n- y\n").is_err());
    }

    #[test]
    fn test_iter_in_canonical_order() {
        let changes = Changes::parse("### Security\n- s\n### Added\n- a\n").unwrap();
        let categories: Vec<Category> = changes.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![Category::Added, Category::Security]);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_serialize_empty_slots_as_empty_maps() {
        let changes = Changes::parse("### Added\n- a\n").unwrap();
        let value = serde_json::to_value(&changes).unwrap();
        assert_eq!(value["added"]["heading"], "### Added\n");
        assert_eq!(value["added"]["content"], "- a\n");
        for name in ["changed", "deprecated", "removed", "fixed", "security"] {
            assert_eq!(value[name], serde_json::json!({}), "{}", name);
        }
    }

    #[test]
    fn test_serialize_default_changes() {
        let json = serde_json::to_string(&Changes::default()).unwrap();
        assert_eq!(
            json,
            r#"{"added":{},"changed":{},"deprecated":{},"removed":{},"fixed":{},"security":{}}"#
        );
    }
}
