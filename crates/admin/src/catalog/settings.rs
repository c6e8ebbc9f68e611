//! Settings singleton and shipping zone operations.

use tracing::instrument;

use storekeep_core::ShippingZoneId;

use super::CatalogStore;
use crate::models::{SettingsInput, ShippingZone, ShippingZoneInput, StoreSettings};

impl CatalogStore {
    #[must_use]
    pub fn settings(&self) -> StoreSettings {
        self.lock().settings.clone()
    }

    /// Replace the scalar settings. Shipping zones are left as they are.
    #[instrument(skip(self, input), fields(store_name = %input.store_name))]
    pub fn replace_settings(&self, input: SettingsInput) -> StoreSettings {
        let mut state = self.lock();
        let settings = &mut state.settings;
        settings.store_name = input.store_name;
        settings.support_email = input.support_email;
        settings.support_phone = input.support_phone;
        settings.currency = input.currency;
        settings.payments = input.payments;
        tracing::info!(currency = ?settings.currency, "Settings replaced");
        settings.clone()
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_shipping_zone(&self, input: ShippingZoneInput) -> ShippingZone {
        let zone = ShippingZone {
            id: ShippingZoneId::generate(),
            name: input.name,
            region: input.region,
            rates: input.rates,
        };
        self.lock().settings.shipping_zones.push(zone.clone());
        tracing::info!(zone_id = %zone.id, rates = zone.rates.len(), "Shipping zone created");
        zone
    }

    #[instrument(skip(self, input), fields(zone_id = %id))]
    pub fn update_shipping_zone(
        &self,
        id: ShippingZoneId,
        input: ShippingZoneInput,
    ) -> Option<ShippingZone> {
        let mut state = self.lock();
        let zone = state
            .settings
            .shipping_zones
            .iter_mut()
            .find(|z| z.id == id)?;
        zone.name = input.name;
        zone.region = input.region;
        zone.rates = input.rates;
        tracing::info!("Shipping zone updated");
        Some(zone.clone())
    }

    #[instrument(skip(self), fields(zone_id = %id))]
    pub fn delete_shipping_zone(&self, id: ShippingZoneId) -> Option<ShippingZone> {
        let mut state = self.lock();
        let zones = &mut state.settings.shipping_zones;
        let index = zones.iter().position(|z| z.id == id)?;
        let removed = zones.remove(index);
        tracing::info!("Shipping zone deleted");
        Some(removed)
    }
}
