//! The admin catalog store.
//!
//! One [`CatalogStore`] owns the category hierarchy, the product collection,
//! the order ledger, and the settings singleton. Every public operation runs
//! inside a single critical section:
//!
//! 1. acquire the store lock,
//! 2. read or mutate the collections,
//! 3. clone the result out,
//! 4. release the lock.
//!
//! Ids are allocated inside the critical section, so concurrent creates
//! always receive unique, increasing ids. Reads return deep copies; nothing
//! outside the store holds a live reference to its collections.
//!
//! Lookups and mutations of unknown ids return `None` rather than an error.

mod categories;
pub mod dashboard;
mod orders;
mod products;
mod settings;
pub mod tree;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storekeep_core::{CategoryId, OrderId, ProductId};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::media::{MediaNormalizer, UrlMediaNormalizer};
use crate::models::{Category, Order, PageRequest, Product, StoreSettings};

pub use dashboard::{DashboardStats, OrderStatusCounts, ProductCounts};
pub use tree::build_tree;

/// Collections guarded by the store lock.
#[derive(Debug)]
struct CatalogState {
    categories: BTreeMap<CategoryId, Category>,
    /// Most recent first.
    products: Vec<Product>,
    /// Most recent first.
    orders: Vec<Order>,
    settings: StoreSettings,
    last_category_id: u32,
    last_product_id: u32,
    last_order_id: u32,
}

impl CatalogState {
    fn new(settings: StoreSettings) -> Self {
        Self {
            categories: BTreeMap::new(),
            products: Vec::new(),
            orders: Vec::new(),
            settings,
            last_category_id: 0,
            last_product_id: 0,
            last_order_id: 0,
        }
    }
}

/// Advance a sequence and return the new value.
fn next_id(last: &mut u32) -> u32 {
    *last = last.checked_add(1).expect("id sequence exhausted");
    *last
}

/// Thread-safe, in-process admin catalog.
///
/// Construct once at startup and share by reference or `Arc`.
pub struct CatalogStore {
    state: Mutex<CatalogState>,
    media: Arc<dyn MediaNormalizer>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CatalogStore")
            .field("categories", &state.categories.len())
            .field("products", &state.products.len())
            .field("orders", &state.orders.len())
            .field("shipping_zones", &state.settings.shipping_zones.len())
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Create an empty store using the URL media normalizer and the system clock.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let media = Arc::new(UrlMediaNormalizer::from_config(&config));
        Self::with_collaborators(config, media, Arc::new(SystemClock))
    }

    /// Create an empty store with explicit collaborators.
    #[must_use]
    pub fn with_collaborators(
        config: StoreConfig,
        media: Arc<dyn MediaNormalizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = StoreSettings::named(&config.store_name);
        Self {
            state: Mutex::new(CatalogState::new(settings)),
            media,
            clock,
            config,
        }
    }

    /// The configuration this store was built with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Enter the critical section. A poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::error!("Catalog store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn page_request(&self, request: PageRequest) -> PageRequest {
        request.normalized(self.config.page_size)
    }

    /// Normalize raw media references, dropping blanks.
    fn normalize_media(&self, raw: &[String]) -> Vec<String> {
        raw.iter()
            .map(|r| self.media.normalize(r))
            .filter(|r| !r.is_empty())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::CatalogStore;
    use crate::clock::FixedClock;
    use crate::config::StoreConfig;
    use crate::media::UrlMediaNormalizer;

    /// A store frozen at 2024-06-15 with the default media base.
    pub fn store() -> CatalogStore {
        let config = StoreConfig::default();
        let media = Arc::new(UrlMediaNormalizer::from_config(&config));
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
        CatalogStore::with_collaborators(config, media, Arc::new(FixedClock::on(today)))
    }
}
