//! Store settings singleton and shipping zones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storekeep_core::{CurrencyCode, ShippingZoneId};

/// Which payment methods checkout offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToggles {
    pub card: bool,
    pub paypal: bool,
    pub bank_transfer: bool,
    pub cash_on_delivery: bool,
}

impl Default for PaymentToggles {
    fn default() -> Self {
        Self {
            card: true,
            paypal: false,
            bank_transfer: false,
            cash_on_delivery: false,
        }
    }
}

/// A rate offered within a shipping zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub label: String,
    pub price: Decimal,
    /// Rate applies only when the order total reaches this amount.
    #[serde(default)]
    pub min_order_total: Option<Decimal>,
}

/// A named shipping region with its rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: ShippingZoneId,
    pub name: String,
    pub region: String,
    pub rates: Vec<ShippingRate>,
}

/// Payload for creating or replacing a shipping zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZoneInput {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub rates: Vec<ShippingRate>,
}

/// Store-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_name: String,
    pub support_email: String,
    pub support_phone: String,
    pub currency: CurrencyCode,
    pub payments: PaymentToggles,
    pub shipping_zones: Vec<ShippingZone>,
}

impl StoreSettings {
    /// Fresh settings for a store called `store_name`.
    #[must_use]
    pub fn named(store_name: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            support_email: String::new(),
            support_phone: String::new(),
            currency: CurrencyCode::default(),
            payments: PaymentToggles::default(),
            shipping_zones: Vec::new(),
        }
    }
}

/// Payload replacing the scalar settings. Shipping zones are managed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInput {
    pub store_name: String,
    #[serde(default)]
    pub support_email: String,
    #[serde(default)]
    pub support_phone: String,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub payments: PaymentToggles,
}

