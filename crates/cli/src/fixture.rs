//! YAML catalog fixtures.
//!
//! A fixture describes a whole catalog as payloads. Categories carry a
//! fixture-local `key` and may name a `parent` key; parents must be listed
//! before their children.
//!
//! ```yaml
//! categories:
//!   - key: apparel
//!     name: Apparel
//!   - key: shirts
//!     parent: apparel
//!     name: Shirts
//! products:
//!   - name: Linen Shirt
//!     category: Shirts
//!     base_price: "40.00"
//!     active: true
//! orders:
//!   - customer_name: Ada Lovelace
//!     items_count: 2
//!     total: "80.00"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use storekeep_admin::CatalogError;
use storekeep_admin::CatalogStore;
use storekeep_admin::models::{
    CategoryInput, OrderInput, ProductInput, SettingsInput, ShippingZoneInput,
};
use storekeep_core::CategoryId;

/// Errors raised while loading or applying a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid fixture YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("category key `{0}` is used more than once")]
    DuplicateKey(String),

    #[error("category `{key}` names parent `{parent}`, which is not listed before it")]
    UnknownParentKey { key: String, parent: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A category entry with fixture-local references.
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    pub key: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(flatten)]
    pub input: CategoryInput,
}

/// A full catalog description.
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub settings: Option<SettingsInput>,
    #[serde(default)]
    pub shipping_zones: Vec<ShippingZoneInput>,
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,
    #[serde(default)]
    pub products: Vec<ProductInput>,
    /// Listed oldest first.
    #[serde(default)]
    pub orders: Vec<OrderInput>,
}

/// What a fixture put into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub shipping_zones: usize,
}

impl Fixture {
    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub async fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FixtureError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let fixture = Self::parse(&content)?;
        info!(
            path = %path.display(),
            categories = fixture.categories.len(),
            products = fixture.products.len(),
            orders = fixture.orders.len(),
            "Parsed fixture"
        );
        Ok(fixture)
    }

    /// Parse fixture YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid fixture.
    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Insert every entry into `store`, resolving category keys to the ids
    /// the store assigns.
    ///
    /// # Errors
    ///
    /// Returns an error if a category key repeats, a parent key is unknown,
    /// or the store rejects a category.
    pub fn apply(self, store: &CatalogStore) -> Result<SeedSummary, FixtureError> {
        let mut summary = SeedSummary::default();

        if let Some(settings) = self.settings {
            store.replace_settings(settings);
        }
        for zone in self.shipping_zones {
            store.create_shipping_zone(zone);
            summary.shipping_zones += 1;
        }

        let mut ids: HashMap<String, CategoryId> = HashMap::new();
        for entry in self.categories {
            if ids.contains_key(&entry.key) {
                return Err(FixtureError::DuplicateKey(entry.key));
            }
            let mut input = entry.input;
            input.parent_id = match entry.parent {
                Some(parent) => match ids.get(&parent) {
                    Some(id) => Some(*id),
                    None => {
                        return Err(FixtureError::UnknownParentKey {
                            key: entry.key,
                            parent,
                        });
                    }
                },
                None => None,
            };
            let created = store.create_category(input)?;
            ids.insert(entry.key, created.id);
            summary.categories += 1;
        }

        for product in self.products {
            store.create_product(product);
            summary.products += 1;
        }
        for order in self.orders {
            store.create_order(order);
            summary.orders += 1;
        }

        info!(
            categories = summary.categories,
            products = summary.products,
            orders = summary.orders,
            shipping_zones = summary.shipping_zones,
            "Fixture applied"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storekeep_admin::StoreConfig;

    const SAMPLE: &str = r#"
categories:
  - key: apparel
    name: Apparel
  - key: shirts
    parent: apparel
    name: Shirts
  - key: shoes
    parent: apparel
    name: Shoes
products:
  - name: Linen Shirt
    category: Shirts
    base_price: "40.00"
    active: true
    sizes:
      - label: M
        inventory: 3
orders:
  - customer_name: Ada Lovelace
    items_count: 2
    total: "80.00"
    status: Delivered
shipping_zones:
  - name: Domestic
    rates:
      - label: Standard
        price: "5.00"
"#;

    #[test]
    fn test_apply_resolves_parent_keys() {
        let store = CatalogStore::new(StoreConfig::default());
        let summary = Fixture::parse(SAMPLE)
            .expect("valid fixture")
            .apply(&store)
            .expect("applies");

        assert_eq!(
            summary,
            SeedSummary {
                categories: 3,
                products: 1,
                orders: 1,
                shipping_zones: 1,
            }
        );
        let tree = store.category_tree();
        assert_eq!(tree.len(), 1);
        let names: Vec<&str> = tree
            .first()
            .map(|root| root.children.iter().map(|c| c.category.name.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["Shirts", "Shoes"]);
        assert_eq!(store.products().first().map(|p| p.stock), Some(3));
    }

    #[test]
    fn test_unknown_parent_key_is_rejected() {
        let yaml = "categories:\n  - key: shirts\n    parent: apparel\n    name: Shirts\n";
        let store = CatalogStore::new(StoreConfig::default());
        let err = Fixture::parse(yaml)
            .expect("valid yaml")
            .apply(&store)
            .expect_err("parent listed later");
        assert!(matches!(err, FixtureError::UnknownParentKey { .. }));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let yaml = "categories:\n  - key: a\n    name: A\n  - key: a\n    name: B\n";
        let store = CatalogStore::new(StoreConfig::default());
        let err = Fixture::parse(yaml)
            .expect("valid yaml")
            .apply(&store)
            .expect_err("duplicate");
        assert!(matches!(err, FixtureError::DuplicateKey(key) if key == "a"));
    }

    #[test]
    fn test_demo_fixture_applies() {
        let store = CatalogStore::new(StoreConfig::default());
        let summary = Fixture::parse(include_str!("../../../fixtures/demo.yaml"))
            .expect("valid fixture")
            .apply(&store)
            .expect("applies");
        assert_eq!(summary.categories, 4);
        assert_eq!(store.settings().store_name, "Corner Shop");
        assert_eq!(store.dashboard_stats().products.out_of_stock, 1);
    }

    #[test]
    fn test_empty_fixture_is_valid() {
        let fixture = Fixture::parse("{}").expect("empty mapping");
        assert!(fixture.categories.is_empty());
        assert!(fixture.settings.is_none());
    }
}
