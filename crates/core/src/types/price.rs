//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors raised when validating a price pair.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// A negative amount was supplied.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The sale price exceeds the regular price.
    #[error("sale price {sale} exceeds base price {base}")]
    SaleAboveBase {
        /// Regular price.
        base: Decimal,
        /// Offending sale price.
        sale: Decimal,
    },
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display, rounded to cents (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }

    /// The price a customer pays: the sale price when present, else the base price.
    #[must_use]
    pub fn effective(base: Decimal, sale: Option<Decimal>) -> Decimal {
        sale.unwrap_or(base)
    }

    /// Check a base/sale price pair.
    ///
    /// The store does not call this; it exists for the request layer, which is
    /// responsible for rejecting malformed payloads before they reach the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either amount is negative or the sale price is
    /// greater than the base price.
    pub fn validate_sale(base: Decimal, sale: Option<Decimal>) -> Result<(), PriceError> {
        if base.is_sign_negative() && !base.is_zero() {
            return Err(PriceError::Negative(base));
        }
        if let Some(sale) = sale {
            if sale.is_sign_negative() && !sale.is_zero() {
                return Err(PriceError::Negative(sale));
            }
            if sale > base {
                return Err(PriceError::SaleAboveBase { base, sale });
            }
        }
        Ok(())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_cents() {
        let price = Price::new(Decimal::new(199_999, 4), CurrencyCode::USD);
        assert_eq!(price.display(), "$20.00");

        let price = Price::new(Decimal::new(1250, 2), CurrencyCode::GBP);
        assert_eq!(price.display(), "£12.50");
    }

    #[test]
    fn test_effective_prefers_sale() {
        let base = Decimal::from(100);
        assert_eq!(Price::effective(base, Some(Decimal::from(80))), Decimal::from(80));
        assert_eq!(Price::effective(base, None), base);
    }

    #[test]
    fn test_validate_sale_accepts_equal_and_lower() {
        let base = Decimal::from(50);
        assert!(Price::validate_sale(base, None).is_ok());
        assert!(Price::validate_sale(base, Some(base)).is_ok());
        assert!(Price::validate_sale(base, Some(Decimal::from(10))).is_ok());
    }

    #[test]
    fn test_validate_sale_rejects_above_base() {
        let err = Price::validate_sale(Decimal::from(50), Some(Decimal::from(60)))
            .expect_err("sale above base");
        assert_eq!(
            err,
            PriceError::SaleAboveBase {
                base: Decimal::from(50),
                sale: Decimal::from(60),
            }
        );
    }

    #[test]
    fn test_validate_sale_rejects_negative() {
        assert!(matches!(
            Price::validate_sale(Decimal::from(-1), None),
            Err(PriceError::Negative(_))
        ));
    }
}
