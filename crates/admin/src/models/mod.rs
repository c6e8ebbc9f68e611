//! Domain models for the admin catalog.
//!
//! Stored entities (`Category`, `Product`, `Order`, `StoreSettings`) are
//! kept apart from the payloads that create or update them (`*Input`), so
//! derived fields like product stock and status can never be supplied by a
//! caller.

pub mod category;
pub mod order;
pub mod page;
pub mod product;
pub mod settings;

pub use category::{Category, CategoryInput, CategoryNode, slugify};
pub use order::{DateRange, DeliveryDetails, Order, OrderInput, OrderQuery};
pub use page::{Page, PageRequest};
pub use product::{
    InventoryVariant, Product, ProductInput, ProductQuery, SizeOption, VariantInput,
};
pub use settings::{
    PaymentToggles, SettingsInput, ShippingRate, ShippingZone, ShippingZoneInput, StoreSettings,
};
