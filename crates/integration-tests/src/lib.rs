//! Integration tests for Storekeep.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storekeep-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `concurrency` - many threads sharing one store
//! - `scenarios` - end-to-end catalog workflows across crates

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use storekeep_admin::models::{CategoryInput, OrderInput, ProductInput, SizeOption};
use storekeep_admin::{CatalogStore, FixedClock, StoreConfig, UrlMediaNormalizer};
use storekeep_core::{CategoryId, OrderStatus};

/// The date every test store treats as today.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

/// A store with default configuration and a clock frozen at [`today`].
#[must_use]
pub fn test_store() -> CatalogStore {
    let config = StoreConfig::default();
    let media = Arc::new(UrlMediaNormalizer::from_config(&config));
    CatalogStore::with_collaborators(config, media, Arc::new(FixedClock::on(today())))
}

/// A named category payload under an optional parent.
#[must_use]
pub fn category(name: &str, parent: Option<CategoryId>) -> CategoryInput {
    let input = CategoryInput::named(name);
    match parent {
        Some(parent) => input.under(parent),
        None => input,
    }
}

/// An active product whose sizes carry the given inventories.
#[must_use]
pub fn stocked_product(name: &str, category: &str, inventories: &[u32]) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        category: category.to_string(),
        base_price: Decimal::from(25),
        active: true,
        sizes: Some(
            inventories
                .iter()
                .zip(["S", "M", "L", "XL"].iter().cycle())
                .map(|(inventory, label)| SizeOption {
                    label: (*label).to_string(),
                    inventory: *inventory,
                })
                .collect(),
        ),
        ..ProductInput::default()
    }
}

/// An order with a whole-unit total.
#[must_use]
pub fn order(customer: &str, total: i64, status: OrderStatus) -> OrderInput {
    OrderInput {
        customer_name: customer.to_string(),
        items_count: 1,
        total: Decimal::from(total),
        status,
        ..OrderInput::default()
    }
}
