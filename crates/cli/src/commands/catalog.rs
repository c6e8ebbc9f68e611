//! Category tree and filtered listings.

use std::path::Path;

use storekeep_admin::models::{OrderQuery, PageRequest, ProductQuery};

use super::{emit, seeded_store};

/// Print the category forest.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded or output fails.
pub async fn tree(fixture: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = seeded_store(fixture).await?;
    emit(&store.category_tree())
}

/// Filters shared by the listing commands, as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ListingArgs {
    pub search: String,
    /// Product category or order status label.
    pub facet: String,
    /// Product status tab or order date range label.
    pub window: String,
    pub page: u32,
    pub page_size: u32,
}

/// Print one page of products.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded, a label is unknown, or
/// output fails.
pub async fn products(fixture: &Path, args: &ListingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let query = ProductQuery::from_labels(&args.search, &args.facet, &args.window)?;
    let store = seeded_store(fixture).await?;
    let page = store.filter_products_page(&query, PageRequest::new(args.page, args.page_size));
    tracing::info!(total = page.total, pages = page.total_pages(), "Product page ready");
    emit(&page)
}

/// Print one page of orders.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded, the status label is
/// unknown, or output fails.
pub async fn orders(fixture: &Path, args: &ListingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let query = OrderQuery::from_labels(&args.search, &args.facet, &args.window)?;
    let store = seeded_store(fixture).await?;
    let page = store.filter_orders_page(&query, PageRequest::new(args.page, args.page_size));
    tracing::info!(total = page.total, pages = page.total_pages(), "Order page ready");
    emit(&page)
}
