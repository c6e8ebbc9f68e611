//! Dashboard aggregation over the order ledger and product collection.
//!
//! Figures are recomputed from the collections on every call.

use std::cmp::Reverse;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use storekeep_core::{OrderStatus, ProductStatus};

use super::CatalogStore;
use crate::models::{Order, Product};

/// Number of orders in each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderStatusCounts {
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub refund: usize,
}

impl OrderStatusCounts {
    fn record(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Shipped => &mut self.shipped,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Cancelled => &mut self.cancelled,
            OrderStatus::Refund => &mut self.refund,
        };
        *slot += 1;
    }

    #[must_use]
    pub const fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
            OrderStatus::Refund => self.refund,
        }
    }
}

/// Product totals by derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductCounts {
    pub total: usize,
    pub active: usize,
    pub draft: usize,
    pub out_of_stock: usize,
}

impl ProductCounts {
    fn tally(products: &[Product]) -> Self {
        products.iter().fold(
            Self {
                total: products.len(),
                ..Self::default()
            },
            |mut counts, product| {
                match product.status {
                    ProductStatus::Active => counts.active += 1,
                    ProductStatus::Draft => counts.draft += 1,
                    ProductStatus::OutOfStock => counts.out_of_stock += 1,
                    ProductStatus::Archived => {}
                }
                counts
            },
        )
    }
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of every order total.
    pub total_revenue: Decimal,
    pub total_orders: usize,
    /// Sum of every order's item count.
    pub total_items: u64,
    pub status_counts: OrderStatusCounts,
    /// Revenue per item sold, to the cent.
    pub average_selling_price: Decimal,
    /// Configured purchase rate times items sold.
    pub purchase_cost: Decimal,
    pub gross_profit: Decimal,
    /// Sum of totals of orders in `Refund`.
    pub refunded_revenue: Decimal,
    /// Refunded share of revenue, as a percentage to one decimal place.
    pub return_rate: Decimal,
    pub products: ProductCounts,
}

/// Decimal sums that stick at the representable bounds instead of panicking.
#[derive(Debug, Default)]
struct Saturating {
    overflowed: bool,
}

impl Saturating {
    fn settle(&mut self, checked: Option<Decimal>, bound: Decimal) -> Decimal {
        checked.unwrap_or_else(|| {
            self.overflowed = true;
            bound
        })
    }

    fn add(&mut self, a: Decimal, b: Decimal) -> Decimal {
        let bound = if b.is_sign_negative() { Decimal::MIN } else { Decimal::MAX };
        self.settle(a.checked_add(b), bound)
    }

    fn sub(&mut self, a: Decimal, b: Decimal) -> Decimal {
        let bound = if b.is_sign_negative() { Decimal::MAX } else { Decimal::MIN };
        self.settle(a.checked_sub(b), bound)
    }

    fn mul(&mut self, a: Decimal, b: Decimal) -> Decimal {
        let bound = if a.is_sign_negative() == b.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        };
        self.settle(a.checked_mul(b), bound)
    }
}

impl DashboardStats {
    /// Aggregate the ledger and product collection.
    ///
    /// Money figures saturate at `Decimal::MAX` and `Decimal::MIN`.
    #[must_use]
    pub fn aggregate(orders: &[Order], products: &[Product], average_purchase_rate: Decimal) -> Self {
        let mut sums = Saturating::default();
        let mut total_revenue = Decimal::ZERO;
        let mut refunded_revenue = Decimal::ZERO;
        let mut total_items = 0u64;
        let mut status_counts = OrderStatusCounts::default();

        for order in orders {
            total_revenue = sums.add(total_revenue, order.total);
            total_items = total_items.saturating_add(u64::from(order.items_count));
            status_counts.record(order.status);
            if order.status == OrderStatus::Refund {
                refunded_revenue = sums.add(refunded_revenue, order.total);
            }
        }

        let items = Decimal::from(total_items);
        let average_selling_price = total_revenue
            .checked_div(items)
            .unwrap_or_default()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let purchase_cost = sums.mul(average_purchase_rate, items);
        let gross_profit = sums.sub(total_revenue, purchase_cost);
        let return_rate = refunded_revenue
            .checked_div(total_revenue)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or_default()
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

        if sums.overflowed {
            tracing::warn!(orders = orders.len(), "Dashboard money figures saturated");
        }

        Self {
            total_revenue,
            total_orders: orders.len(),
            total_items,
            status_counts,
            average_selling_price,
            purchase_cost,
            gross_profit,
            refunded_revenue,
            return_rate,
            products: ProductCounts::tally(products),
        }
    }
}

impl CatalogStore {
    /// Current dashboard figures.
    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        let state = self.lock();
        let stats = DashboardStats::aggregate(
            &state.orders,
            &state.products,
            self.config.average_purchase_rate,
        );
        tracing::debug!(orders = stats.total_orders, revenue = %stats.total_revenue, "Dashboard aggregated");
        stats
    }

    /// Best-rated products first; ties go to the most reviewed, then the
    /// oldest. Unrated products come last.
    #[must_use]
    pub fn popular_products(&self, limit: usize) -> Vec<Product> {
        let mut ranked = self.products();
        ranked.sort_by_key(|p| (Reverse(p.rating), Reverse(p.review_count), p.id));
        ranked.truncate(limit);
        ranked
    }
}
