//! Order ledger operations.

use tracing::instrument;

use storekeep_core::{OrderId, OrderStatus};

use super::{CatalogStore, next_id};
use crate::models::{Order, OrderInput, OrderQuery, Page, PageRequest};

impl CatalogStore {
    /// Record a checkout at the head of the ledger.
    ///
    /// The order date defaults to today's date from the store clock.
    #[instrument(skip(self, input), fields(items = input.items_count, total = %input.total))]
    pub fn create_order(&self, input: OrderInput) -> Order {
        let now = self.clock.now();
        let initials = input.resolved_initials();

        let mut state = self.lock();
        let id = OrderId::new(next_id(&mut state.last_order_id));
        let order = Order {
            id,
            order_number: Order::number_for(id),
            customer_name: input.customer_name,
            initials,
            date: input.date.unwrap_or_else(|| now.date_naive()),
            items_count: input.items_count,
            total: input.total,
            delivery: input.delivery,
            status: input.status,
            created_at: now,
        };

        assert!(
            state.orders.iter().all(|o| o.id != id),
            "duplicate order id {id}"
        );
        state.orders.insert(0, order.clone());

        tracing::info!(order_id = %id, order_number = %order.order_number, "Order recorded");
        order
    }

    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.lock().orders.iter().find(|o| o.id == id).cloned()
    }

    /// The whole ledger, most recent first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Option<Order> {
        let mut state = self.lock();
        let order = state.orders.iter_mut().find(|o| o.id == id)?;
        let previous = order.status;
        order.status = status;
        tracing::info!(%previous, "Order status changed");
        Some(order.clone())
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub fn delete_order(&self, id: OrderId) -> Option<Order> {
        let mut state = self.lock();
        let index = state.orders.iter().position(|o| o.id == id)?;
        let removed = state.orders.remove(index);
        tracing::info!("Order deleted");
        Some(removed)
    }

    /// Orders matching `query`, most recent first.
    ///
    /// Date windows are measured back from the store clock's today.
    #[must_use]
    pub fn filter_orders(&self, query: &OrderQuery) -> Vec<Order> {
        let min_date = query.range.min_date(self.clock.today());
        let matched: Vec<Order> = self
            .lock()
            .orders
            .iter()
            .filter(|o| query.matches(o, min_date))
            .cloned()
            .collect();
        tracing::debug!(search = %query.search, range = ?query.range, matched = matched.len(), "Filtered orders");
        matched
    }

    #[must_use]
    pub fn filter_orders_page(&self, query: &OrderQuery, request: PageRequest) -> Page<Order> {
        let request = self.page_request(request);
        let min_date = query.range.min_date(self.clock.today());
        let state = self.lock();
        Page::slice(
            state
                .orders
                .iter()
                .filter(|o| query.matches(o, min_date)),
            request,
        )
        .map(Order::clone)
    }

    /// The `limit` most recent orders.
    #[must_use]
    pub fn recent_orders(&self, limit: usize) -> Vec<Order> {
        self.lock().orders.iter().take(limit).cloned().collect()
    }
}
