use crate::domain::changes::Category;
use crate::error::{ChangelogError, Result};

/// Order in which change categories are written out
///
/// Always holds all six categories exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOrder(Vec<Category>);

impl TagOrder {
    /// Build an order from a (possibly partial) preference list.
    ///
    /// Categories not mentioned are appended in canonical order.
    /// Mentioning a category twice is an error.
    pub fn new(preferred: &[Category]) -> Result<Self> {
        let mut order: Vec<Category> = Vec::with_capacity(Category::ALL.len());
        for &category in preferred {
            if order.contains(&category) {
                return Err(ChangelogError::DuplicateCategory(category.to_string()));
            }
            order.push(category);
        }

        for category in Category::ALL {
            if !order.contains(&category) {
                order.push(category);
            }
        }

        Ok(TagOrder(order))
    }

    /// Same as [`TagOrder::new`] but from category names, matched case-insensitively
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let categories = names
            .iter()
            .map(|name| name.as_ref().parse::<Category>())
            .collect::<Result<Vec<_>>>()?;
        TagOrder::new(&categories)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.0
    }
}

impl Default for TagOrder {
    fn default() -> Self {
        TagOrder(Category::ALL.to_vec())
    }
}
