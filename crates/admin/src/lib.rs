//! Storekeep Admin library.
//!
//! The admin catalog store: an in-process, thread-safe repository that owns
//! the category hierarchy, the product collection, the order ledger, and the
//! store settings singleton.
//!
//! # Architecture
//!
//! - [`catalog::CatalogStore`] guards every collection behind one lock and
//!   hands out deep copies, so callers never alias internal state.
//! - [`media::MediaNormalizer`] and [`clock::Clock`] are constructor-injected
//!   collaborators; neither performs I/O.
//! - HTTP routing, authentication and persistence live outside this crate and
//!   call into the store.
//!
//! ```
//! use storekeep_admin::{CatalogStore, StoreConfig};
//! use storekeep_admin::models::CategoryInput;
//!
//! let store = CatalogStore::new(StoreConfig::default());
//! let apparel = store
//!     .create_category(CategoryInput::named("Apparel"))
//!     .expect("root category");
//! assert_eq!(apparel.sort_order, 1);
//! assert_eq!(store.category_tree().len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod media;
pub mod models;

pub use catalog::CatalogStore;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use error::CatalogError;
pub use media::{MediaNormalizer, UrlMediaNormalizer};
