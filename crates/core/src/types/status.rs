//! Status enums for catalog entities.
//!
//! Product status is never stored from caller input: it is derived from the
//! product's `active` flag and computed stock by [`ProductStatus::resolve`].

use serde::{Deserialize, Serialize};

/// Error returned when a status label cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} label: {label}")]
pub struct ParseStatusError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub label: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_owned(),
        }
    }
}

/// Derived product status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// Not yet published (`active == false`).
    #[default]
    Draft,
    /// Published with stock on hand.
    Active,
    /// Published but every variant is sold out.
    OutOfStock,
    /// Retired from the catalog. Only reachable as a filter target.
    Archived,
}

impl ProductStatus {
    /// Resolve the status of a product from its `active` flag and computed stock.
    ///
    /// ```
    /// use storekeep_core::ProductStatus;
    ///
    /// assert_eq!(ProductStatus::resolve(false, 10), ProductStatus::Draft);
    /// assert_eq!(ProductStatus::resolve(true, 0), ProductStatus::OutOfStock);
    /// assert_eq!(ProductStatus::resolve(true, 3), ProductStatus::Active);
    /// ```
    #[must_use]
    pub const fn resolve(active: bool, stock: u32) -> Self {
        match (active, stock) {
            (false, _) => Self::Draft,
            (true, 0) => Self::OutOfStock,
            (true, _) => Self::Active,
        }
    }

    /// Label as shown in the admin UI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::OutOfStock => "OutOfStock",
            Self::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product list tab in the admin UI.
///
/// Each tab narrows the list to one derived [`ProductStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StatusTab {
    #[default]
    All,
    Active,
    Drafts,
    Archived,
}

impl StatusTab {
    /// The derived status this tab selects, or `None` for the unfiltered tab.
    #[must_use]
    pub const fn status(self) -> Option<ProductStatus> {
        match self {
            Self::All => None,
            Self::Active => Some(ProductStatus::Active),
            Self::Drafts => Some(ProductStatus::Draft),
            Self::Archived => Some(ProductStatus::Archived),
        }
    }
}

impl std::str::FromStr for StatusTab {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "drafts" | "draft" => Ok(Self::Drafts),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseStatusError::new("status tab", s)),
        }
    }
}

/// Order lifecycle status, set by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refund,
}

impl OrderStatus {
    /// Every status, in dashboard display order.
    pub const ALL: [Self; 5] = [
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refund,
    ];

    /// Label as shown in the admin UI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refund => "Refund",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError::new("order status", s))
    }
}
