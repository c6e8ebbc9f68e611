//! Product catalog models.
//!
//! `stock` and `status` are derived fields. They are recomputed from the
//! inventory variants and the `active` flag on every create and update, so a
//! caller can never set them out of sync.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storekeep_core::{ParseStatusError, Price, ProductId, ProductStatus, StatusTab};

use crate::media::MediaNormalizer;

/// One purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryVariant {
    pub label: String,
    pub price: Decimal,
    pub sku: String,
    pub inventory: u32,
}

/// A size option with its on-hand inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub label: String,
    #[serde(default)]
    pub inventory: u32,
}

/// An explicitly supplied variant. Missing price and SKU are filled in by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInput {
    pub label: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub inventory: u32,
}

/// A product in the admin catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Sequential, store-assigned ID.
    pub id: ProductId,
    /// Store-formatted SKU (`SKU-00042`).
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub tags: Vec<String>,
    pub badges: Vec<String>,
    pub base_price: Decimal,
    pub sale_price: Option<Decimal>,
    /// Canonical media references; the first is the main image. Never empty.
    pub media_refs: Vec<String>,
    /// Public URL of the main image.
    pub image_url: String,
    /// Public URLs of every media reference, in order.
    pub thumbnails: Vec<String>,
    pub inventory_variants: Vec<InventoryVariant>,
    /// Colour options offered in the editor.
    pub colors: Vec<String>,
    /// Size options offered in the editor.
    pub sizes: Vec<SizeOption>,
    pub related_products: Vec<ProductId>,
    /// Average review rating (0-5).
    pub rating: Option<Decimal>,
    pub review_count: u32,
    /// Sum of variant inventories.
    pub stock: u32,
    /// Resolved from `active` and `stock`.
    pub status: ProductStatus,
    pub active: bool,
    pub featured: bool,
    pub new_arrival: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Format the store SKU for a product ID.
    #[must_use]
    pub fn sku_for(id: ProductId) -> String {
        format!("SKU-{:05}", id.as_u32())
    }

    /// Recompute every derived field.
    ///
    /// Substitutes `placeholder` when no media remains.
    pub(crate) fn refresh_derived(&mut self, media: &dyn MediaNormalizer, placeholder: &str) {
        self.media_refs.retain(|r| !r.trim().is_empty());
        if self.media_refs.is_empty() {
            self.media_refs.push(placeholder.to_string());
        }
        self.thumbnails = self
            .media_refs
            .iter()
            .map(|r| media.to_public_url(r))
            .collect();
        self.image_url = self.thumbnails.first().cloned().unwrap_or_default();

        self.stock = total_stock(&self.inventory_variants);
        self.status = ProductStatus::resolve(self.active, self.stock);
    }
}

/// Sum of variant inventories, saturating at `u32::MAX`.
#[must_use]
pub fn total_stock(variants: &[InventoryVariant]) -> u32 {
    variants
        .iter()
        .fold(0u32, |acc, v| acc.saturating_add(v.inventory))
}

/// Payload for creating or updating a product.
///
/// On update, an empty `media` list, absent `variants`, absent `colors`, and
/// an absent or empty `sizes` list keep the existing values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub base_price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    /// Raw media references (URLs, paths, or inline data).
    #[serde(default)]
    pub media: Vec<String>,
    /// Explicit variants. Take precedence over the size matrix.
    #[serde(default)]
    pub variants: Option<Vec<VariantInput>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub sizes: Option<Vec<SizeOption>>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub new_arrival: bool,
}

impl ProductInput {
    /// Build inventory variants for a product with the given SKU.
    ///
    /// Explicit variants win. Otherwise one variant is generated per size,
    /// priced at the effective price and suffixed `-1`, `-2`, ... Returns
    /// `None` when the payload carries neither.
    pub(crate) fn build_variants(&self, product_sku: &str) -> Option<Vec<InventoryVariant>> {
        let price = Price::effective(self.base_price, self.sale_price);

        if let Some(explicit) = self.variants.as_ref().filter(|v| !v.is_empty()) {
            return Some(
                explicit
                    .iter()
                    .enumerate()
                    .map(|(index, v)| InventoryVariant {
                        label: v.label.clone(),
                        price: v.price.unwrap_or(price),
                        sku: v
                            .sku
                            .clone()
                            .filter(|s| !s.trim().is_empty())
                            .unwrap_or_else(|| format!("{product_sku}-{}", index + 1)),
                        inventory: v.inventory,
                    })
                    .collect(),
            );
        }

        let sizes = self.sizes.as_ref().filter(|s| !s.is_empty())?;
        let single_color = match self.colors.as_deref() {
            Some([color]) => Some(color.as_str()),
            _ => None,
        };
        Some(
            sizes
                .iter()
                .enumerate()
                .map(|(index, size)| InventoryVariant {
                    label: single_color.map_or_else(
                        || size.label.clone(),
                        |color| format!("{color} / {}", size.label),
                    ),
                    price,
                    sku: format!("{product_sku}-{}", index + 1),
                    inventory: size.inventory,
                })
                .collect(),
        )
    }
}

/// Product list filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of name, SKU, or tags. Blank matches all.
    #[serde(default)]
    pub search: String,
    /// Exact category name, or `None` for every category.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tab: StatusTab,
}

impl ProductQuery {
    /// Sentinel category label meaning "no category filter".
    pub const ALL_CATEGORIES: &'static str = "all";

    /// Build a query from UI labels.
    ///
    /// A category equal to `all` (any case) or blank disables the category
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `tab` is not a known status tab label.
    pub fn from_labels(search: &str, category: &str, tab: &str) -> Result<Self, ParseStatusError> {
        let category = category.trim();
        let category = (!category.is_empty() && !category.eq_ignore_ascii_case(Self::ALL_CATEGORIES))
            .then(|| category.to_string());
        Ok(Self {
            search: search.trim().to_string(),
            category,
            tab: tab.parse()?,
        })
    }

    /// Whether `product` passes every predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(status) = self.tab.status() {
            if product.status != status {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {}",
            product.name,
            product.sku,
            product.tags.join(" ")
        )
        .to_lowercase();
        haystack.contains(&needle)
    }
}
