//! Order ledger models.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storekeep_core::{OrderId, OrderStatus, ParseStatusError};

/// Shipping destination and method.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryDetails {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub method: String,
}

/// A ledger entry for one checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential, store-assigned ID.
    pub id: OrderId,
    /// Customer-facing order number (e.g., "#ORD-0007").
    pub order_number: String,
    pub customer_name: String,
    pub initials: String,
    /// Calendar date the order was placed.
    pub date: NaiveDate,
    pub items_count: u32,
    pub total: Decimal,
    pub delivery: DeliveryDetails,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Format the customer-facing order number.
    #[must_use]
    pub fn number_for(id: OrderId) -> String {
        format!("#ORD-{:04}", id.as_u32())
    }
}

/// Payload for recording a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_name: String,
    /// Derived from the customer name when absent.
    #[serde(default)]
    pub initials: Option<String>,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub items_count: u32,
    pub total: Decimal,
    #[serde(default)]
    pub delivery: DeliveryDetails,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderInput {
    pub(crate) fn resolved_initials(&self) -> String {
        self.initials
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| initials_for(&self.customer_name), str::to_uppercase)
    }
}

/// Uppercase first letters of the first two words of a name.
///
/// ```
/// use storekeep_admin::models::order::initials_for;
///
/// assert_eq!(initials_for("ada lovelace byron"), "AL");
/// assert_eq!(initials_for("Prince"), "P");
/// ```
#[must_use]
pub fn initials_for(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Named order-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    Last7Days,
    Last30Days,
    ThisYear,
    #[default]
    All,
}

impl DateRange {
    /// Parse a UI label. Unknown labels mean "no restriction".
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "last 7 days" => Self::Last7Days,
            "last 30 days" => Self::Last30Days,
            "this year" => Self::ThisYear,
            _ => Self::All,
        }
    }

    /// Earliest order date inside the window, relative to `today`.
    #[must_use]
    pub fn min_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Last7Days => today.checked_sub_days(Days::new(7)),
            Self::Last30Days => today.checked_sub_days(Days::new(30)),
            Self::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Self::All => None,
        }
    }
}

/// Order list filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Case-insensitive substring of the order number or customer name.
    #[serde(default)]
    pub search: String,
    /// Exact status, or `None` for every status.
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub range: DateRange,
}

impl OrderQuery {
    /// Sentinel status label meaning "no status filter".
    pub const ALL_STATUSES: &'static str = "All";

    /// Build a query from UI labels.
    ///
    /// # Errors
    ///
    /// Returns an error if `status` is neither `All` nor a known order status.
    pub fn from_labels(search: &str, status: &str, range: &str) -> Result<Self, ParseStatusError> {
        let status = status.trim();
        let status = if status.is_empty() || status.eq_ignore_ascii_case(Self::ALL_STATUSES) {
            None
        } else {
            Some(status.parse()?)
        };
        Ok(Self {
            search: search.trim().to_string(),
            status,
            range: DateRange::from_label(range),
        })
    }

    /// Whether `order` passes every predicate, given the window's lower bound.
    #[must_use]
    pub fn matches(&self, order: &Order, min_date: Option<NaiveDate>) -> bool {
        if self.status.is_some_and(|status| order.status != status) {
            return false;
        }
        if min_date.is_some_and(|min| order.date < min) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || order.order_number.to_lowercase().contains(&needle)
            || order.customer_name.to_lowercase().contains(&needle)
    }
}
