//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe sequential ID wrapper.
///
/// Creates a newtype wrapper around `u32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_u32()`
/// - `From<u32>`, `Into<u32>`, `Display` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use storekeep_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget_id = WidgetId::new(1);
/// let gadget_id = GadgetId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WidgetId = gadget_id;
/// assert_eq!(widget_id.as_u32(), gadget_id.as_u32());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a new ID from a u32 value.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the underlying u32 value.
            #[must_use]
            pub const fn as_u32(&self) -> u32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u32>().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Store-assigned sequential IDs
define_id!(CategoryId);
define_id!(ProductId);
define_id!(OrderId);

/// Shipping zone identifier, a random v4 UUID assigned on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingZoneId(Uuid);

impl ShippingZoneId {
    /// Generate a fresh random zone ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl core::fmt::Display for ShippingZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for ShippingZoneId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_through_u32() {
        let id = ProductId::new(42);
        assert_eq!(id.as_u32(), 42);
        assert_eq!(u32::from(id), 42);
        assert_eq!(ProductId::from(42), id);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id: CategoryId = " 7 ".parse().expect("valid id");
        assert_eq!(id, CategoryId::new(7));
        assert_eq!(id.to_string(), "7");
        assert!("seven".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&OrderId::new(3)).expect("serialize");
        assert_eq!(json, "3");
        let back: OrderId = serde_json::from_str("3").expect("deserialize");
        assert_eq!(back, OrderId::new(3));
    }

    #[test]
    fn test_ids_order_numerically() {
        assert!(ProductId::new(2) < ProductId::new(10));
    }

    #[test]
    fn test_shipping_zone_ids_are_unique() {
        let a = ShippingZoneId::generate();
        let b = ShippingZoneId::generate();
        assert_ne!(a, b);
        let parsed: ShippingZoneId = a.to_string().parse().expect("valid uuid");
        assert_eq!(parsed, a);
    }
}
