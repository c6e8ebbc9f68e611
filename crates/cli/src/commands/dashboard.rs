//! Dashboard report.

use std::path::Path;

use serde::Serialize;

use storekeep_admin::catalog::DashboardStats;
use storekeep_admin::models::{Order, Product};
use storekeep_core::{CurrencyCode, Price};

use super::{emit, seeded_store};

/// Money figures rendered in the store currency.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct MoneyFigures {
    total_revenue: String,
    average_selling_price: String,
    purchase_cost: String,
    gross_profit: String,
    refunded_revenue: String,
}

impl MoneyFigures {
    fn new(stats: &DashboardStats, currency: CurrencyCode) -> Self {
        let show = |amount| Price::new(amount, currency).display();
        Self {
            total_revenue: show(stats.total_revenue),
            average_selling_price: show(stats.average_selling_price),
            purchase_cost: show(stats.purchase_cost),
            gross_profit: show(stats.gross_profit),
            refunded_revenue: show(stats.refunded_revenue),
        }
    }
}

#[derive(Debug, Serialize)]
struct DashboardReport {
    store_name: String,
    currency: CurrencyCode,
    stats: DashboardStats,
    money: MoneyFigures,
    recent_orders: Vec<Order>,
    popular_products: Vec<Product>,
}

/// Print dashboard figures with the most recent orders and the best-rated
/// products.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded or output fails.
pub async fn show(fixture: &Path, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let store = seeded_store(fixture).await?;
    let settings = store.settings();
    let stats = store.dashboard_stats();
    let report = DashboardReport {
        store_name: settings.store_name,
        currency: settings.currency,
        money: MoneyFigures::new(&stats, settings.currency),
        stats,
        recent_orders: store.recent_orders(limit),
        popular_products: store.popular_products(limit),
    };
    emit(&report)
}
