//! Category hierarchy models.

use serde::{Deserialize, Serialize};

use storekeep_core::CategoryId;

/// A node in the category forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned ID, unique for the lifetime of the store.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Parent category, or `None` for a root.
    pub parent_id: Option<CategoryId>,
    /// 1-based rank among categories sharing `parent_id`.
    pub sort_order: u32,
    /// Whether the category is shown on the storefront.
    pub visible: bool,
    /// Denormalized product counter for display.
    pub product_count: u32,
    /// Free-form description.
    pub description: String,
    /// Canonical media reference of the category image.
    pub image_ref: Option<String>,
}

/// Payload for creating or updating a category.
///
/// Carries no sort order: rank is assigned on create and changed only by
/// reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    /// Derived from `name` when blank.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_ref: Option<String>,
}

const fn default_visible() -> bool {
    true
}

impl CategoryInput {
    /// A visible root category with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: String::new(),
            parent_id: None,
            visible: true,
            product_count: 0,
            description: String::new(),
            image_ref: None,
        }
    }

    /// Set the parent category.
    #[must_use]
    pub const fn under(mut self, parent: CategoryId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// The slug to store: the supplied one, or one derived from the name.
    pub(crate) fn resolved_slug(&self) -> String {
        let supplied = self.slug.trim();
        if supplied.is_empty() {
            slugify(&self.name)
        } else {
            supplied.to_string()
        }
    }
}

/// A category with its ordered children, as produced by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of categories in this subtree, including the node itself.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// IDs in depth-first pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<CategoryId> {
        let mut ids = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            ids.push(node.category.id);
            pending.extend(node.children.iter().rev());
        }
        ids
    }
}

/// Derive a URL slug: lowercase ASCII alphanumerics joined by single dashes.
///
/// ```
/// use storekeep_admin::models::slugify;
///
/// assert_eq!(slugify("Men's T-Shirts & Tops"), "men-s-t-shirts-tops");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Summer   Sale!! "), "summer-sale");
        assert_eq!(slugify("Kids"), "kids");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_resolved_slug_prefers_supplied() {
        let mut input = CategoryInput::named("Hats & Caps");
        assert_eq!(input.resolved_slug(), "hats-caps");
        input.slug = " headwear ".to_string();
        assert_eq!(input.resolved_slug(), "headwear");
    }

    #[test]
    fn test_input_defaults_when_deserialized() {
        let input: CategoryInput = serde_json::from_str(r#"{"name":"Shoes"}"#).expect("parse");
        assert!(input.visible);
        assert_eq!(input.parent_id, None);
        assert_eq!(input.product_count, 0);
    }
}
