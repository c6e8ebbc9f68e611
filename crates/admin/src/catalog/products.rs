//! Product catalog operations.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::instrument;

use storekeep_core::{ProductId, ProductStatus};

use super::{CatalogStore, next_id};
use crate::models::{Page, PageRequest, Product, ProductInput, ProductQuery};

const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

impl CatalogStore {
    /// Create a product and place it at the head of the listing.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_product(&self, input: ProductInput) -> Product {
        let media_refs = self.normalize_media(&input.media);
        let now = self.clock.now();

        let mut state = self.lock();
        let id = ProductId::new(next_id(&mut state.last_product_id));
        let sku = Product::sku_for(id);
        let inventory_variants = input.build_variants(&sku).unwrap_or_default();

        let mut product = Product {
            id,
            sku,
            name: input.name,
            description: input.description,
            category: input.category,
            sub_category: input.sub_category,
            tags: input.tags,
            badges: input.badges,
            base_price: input.base_price,
            sale_price: input.sale_price,
            media_refs,
            image_url: String::new(),
            thumbnails: Vec::new(),
            inventory_variants,
            colors: input.colors.unwrap_or_default(),
            sizes: input.sizes.unwrap_or_default(),
            related_products: Vec::new(),
            rating: None,
            review_count: 0,
            stock: 0,
            status: ProductStatus::default(),
            active: input.active,
            featured: input.featured,
            new_arrival: input.new_arrival,
            created_at: now,
            updated_at: now,
        };
        product.refresh_derived(self.media.as_ref(), &self.config.placeholder_image);

        assert!(
            state.products.iter().all(|p| p.id != id),
            "duplicate product id {id}"
        );
        state.products.insert(0, product.clone());

        tracing::info!(product_id = %id, stock = product.stock, status = %product.status, "Product created");
        product
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.lock().products.iter().find(|p| p.id == id).cloned()
    }

    /// Every product, most recent first.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Replace a product's editable fields and rederive stock and status.
    ///
    /// Empty `media` keeps the current media. A payload with neither
    /// variants nor sizes keeps the current variants. An absent colour list
    /// and an absent or empty size list keep the current lists. Ratings,
    /// related products, and the creation time are never touched here.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub fn update_product(&self, id: ProductId, input: ProductInput) -> Option<Product> {
        let media_refs = self.normalize_media(&input.media);
        let now = self.clock.now();

        let mut state = self.lock();
        let product = state.products.iter_mut().find(|p| p.id == id)?;

        if let Some(variants) = input.build_variants(&product.sku) {
            product.inventory_variants = variants;
        }
        if !media_refs.is_empty() {
            product.media_refs = media_refs;
        }
        if let Some(colors) = input.colors {
            product.colors = colors;
        }
        if let Some(sizes) = input.sizes.filter(|s| !s.is_empty()) {
            product.sizes = sizes;
        }
        product.name = input.name;
        product.description = input.description;
        product.category = input.category;
        product.sub_category = input.sub_category;
        product.tags = input.tags;
        product.badges = input.badges;
        product.base_price = input.base_price;
        product.sale_price = input.sale_price;
        product.active = input.active;
        product.featured = input.featured;
        product.new_arrival = input.new_arrival;
        product.updated_at = now;
        product.refresh_derived(self.media.as_ref(), &self.config.placeholder_image);

        tracing::info!(stock = product.stock, status = %product.status, "Product updated");
        Some(product.clone())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub fn delete_product(&self, id: ProductId) -> Option<Product> {
        let mut state = self.lock();
        let index = state.products.iter().position(|p| p.id == id)?;
        let removed = state.products.remove(index);
        tracing::info!("Product deleted");
        Some(removed)
    }

    /// Detach one media reference from a product.
    ///
    /// `media_ref` may be in any form the normalizer accepts. Removing the
    /// last reference leaves the placeholder image in its place.
    #[instrument(skip(self, media_ref), fields(product_id = %id))]
    pub fn remove_product_media(&self, id: ProductId, media_ref: &str) -> Option<Product> {
        let target = self.media.normalize(media_ref);
        let now = self.clock.now();

        let mut state = self.lock();
        let product = state.products.iter_mut().find(|p| p.id == id)?;
        let before = product.media_refs.len();
        product.media_refs.retain(|r| *r != target);
        if product.media_refs.len() == before {
            tracing::debug!(media_ref = %target, "Media reference not attached");
            return Some(product.clone());
        }

        product.updated_at = now;
        product.refresh_derived(self.media.as_ref(), &self.config.placeholder_image);
        tracing::info!(media_ref = %target, remaining = product.media_refs.len(), "Product media removed");
        Some(product.clone())
    }

    /// Replace the related-product list.
    ///
    /// The product itself, repeats, and unknown ids are dropped.
    #[instrument(skip(self, related), fields(product_id = %id, requested = related.len()))]
    pub fn set_related_products(&self, id: ProductId, related: Vec<ProductId>) -> Option<Product> {
        let mut state = self.lock();
        let known: HashSet<ProductId> = state.products.iter().map(|p| p.id).collect();
        let product = state.products.iter_mut().find(|p| p.id == id)?;

        let mut seen = HashSet::new();
        product.related_products = related
            .into_iter()
            .filter(|r| *r != id && known.contains(r) && seen.insert(*r))
            .collect();

        tracing::info!(related = product.related_products.len(), "Related products set");
        Some(product.clone())
    }

    /// Record review aggregates. The rating is clamped to 0-5.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn rate_product(&self, id: ProductId, rating: Decimal, review_count: u32) -> Option<Product> {
        let mut state = self.lock();
        let product = state.products.iter_mut().find(|p| p.id == id)?;
        product.rating = Some(rating.clamp(Decimal::ZERO, MAX_RATING));
        product.review_count = review_count;
        Some(product.clone())
    }

    /// Products matching `query`, most recent first.
    #[must_use]
    pub fn filter_products(&self, query: &ProductQuery) -> Vec<Product> {
        let matched: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        tracing::debug!(search = %query.search, tab = ?query.tab, matched = matched.len(), "Filtered products");
        matched
    }

    /// One page of the products matching `query`.
    #[must_use]
    pub fn filter_products_page(&self, query: &ProductQuery, request: PageRequest) -> Page<Product> {
        let request = self.page_request(request);
        let state = self.lock();
        let page = Page::slice(state.products.iter().filter(|p| query.matches(p)), request)
            .map(Product::clone);
        tracing::debug!(page = page.page, total = page.total, "Filtered product page");
        page
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::store;
    use super::*;
    use crate::models::{SizeOption, VariantInput};
    use storekeep_core::StatusTab;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: "Shirts".to_string(),
            base_price: Decimal::from(40),
            active: true,
            ..ProductInput::default()
        }
    }

    fn sized(name: &str, inventories: &[u32]) -> ProductInput {
        let mut payload = input(name);
        payload.sizes = Some(
            inventories
                .iter()
                .enumerate()
                .map(|(i, inventory)| SizeOption {
                    label: format!("S{i}"),
                    inventory: *inventory,
                })
                .collect(),
        );
        payload
    }

    // =========================================================================
    // Create
    // =========================================================================

    #[test]
    fn test_create_assigns_sku_and_prepends() {
        let store = store();
        let first = store.create_product(input("First"));
        let second = store.create_product(input("Second"));

        assert_eq!(first.sku, "SKU-00001");
        assert_eq!(second.sku, "SKU-00002");
        let order: Vec<ProductId> = store.products().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![second.id, first.id]);
    }

    #[test]
    fn test_create_without_media_uses_placeholder() {
        let store = store();
        let product = store.create_product(input("Bare"));
        assert_eq!(product.media_refs, vec!["uploads/placeholder.png".to_string()]);
        assert_eq!(product.image_url, "http://localhost:3000/uploads/placeholder.png");
        assert_eq!(product.thumbnails.len(), 1);
    }

    #[test]
    fn test_create_normalizes_media() {
        let store = store();
        let mut payload = input("Pictured");
        payload.media = vec![
            "http://localhost:3000/uploads/front.jpg".to_string(),
            "  ".to_string(),
            "/back.jpg".to_string(),
        ];
        let product = store.create_product(payload);
        assert_eq!(
            product.media_refs,
            vec!["uploads/front.jpg".to_string(), "uploads/back.jpg".to_string()]
        );
        assert_eq!(product.image_url, "http://localhost:3000/uploads/front.jpg");
    }

    #[test]
    fn test_active_product_with_no_stock_is_out_of_stock() {
        let store = store();
        let product = store.create_product(sized("Tee", &[0, 0]));
        assert_eq!(product.stock, 0);
        assert_eq!(product.status, ProductStatus::OutOfStock);
    }

    #[test]
    fn test_stock_sums_size_inventory() {
        let store = store();
        let product = store.create_product(sized("Tee", &[3, 4]));
        assert_eq!(product.stock, 7);
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(product.inventory_variants.len(), 2);
    }

    #[test]
    fn test_inactive_product_is_draft_and_found_by_drafts_tab() {
        let store = store();
        let mut payload = sized("Hidden", &[5]);
        payload.active = false;
        let draft = store.create_product(payload);
        store.create_product(sized("Visible", &[5]));

        assert_eq!(draft.status, ProductStatus::Draft);
        let query = ProductQuery {
            tab: StatusTab::Drafts,
            ..ProductQuery::default()
        };
        let found: Vec<ProductId> = store.filter_products(&query).iter().map(|p| p.id).collect();
        assert_eq!(found, vec![draft.id]);
    }

    // =========================================================================
    // Update
    // =========================================================================

    #[test]
    fn test_update_keeps_variants_and_media_when_absent() {
        let store = store();
        let mut payload = sized("Tee", &[2, 2]);
        payload.media = vec!["uploads/tee.jpg".to_string()];
        let created = store.create_product(payload);

        let updated = store
            .update_product(created.id, input("Tee v2"))
            .expect("exists");
        assert_eq!(updated.name, "Tee v2");
        assert_eq!(updated.inventory_variants, created.inventory_variants);
        assert_eq!(updated.sizes, created.sizes);
        assert_eq!(updated.media_refs, created.media_refs);
        assert_eq!(updated.stock, 4);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_update_rederives_status() {
        let store = store();
        let created = store.create_product(sized("Tee", &[2]));

        let mut payload = sized("Tee", &[0]);
        payload.active = true;
        let sold_out = store.update_product(created.id, payload).expect("exists");
        assert_eq!(sold_out.status, ProductStatus::OutOfStock);

        let mut payload = input("Tee");
        payload.active = false;
        let drafted = store.update_product(created.id, payload).expect("exists");
        assert_eq!(drafted.status, ProductStatus::Draft);
    }

    #[test]
    fn test_update_preserves_reviews_and_related() {
        let store = store();
        let a = store.create_product(input("A"));
        let b = store.create_product(input("B"));
        store.rate_product(a.id, Decimal::new(45, 1), 12);
        store.set_related_products(a.id, vec![b.id]);

        let updated = store.update_product(a.id, input("A2")).expect("exists");
        assert_eq!(updated.rating, Some(Decimal::new(45, 1)));
        assert_eq!(updated.review_count, 12);
        assert_eq!(updated.related_products, vec![b.id]);
    }

    #[test]
    fn test_update_explicit_variants_replace_existing() {
        let store = store();
        let created = store.create_product(sized("Tee", &[2, 2]));
        let mut payload = input("Tee");
        payload.variants = Some(vec![VariantInput {
            label: "One size".to_string(),
            price: None,
            sku: None,
            inventory: 1,
        }]);
        let updated = store.update_product(created.id, payload).expect("exists");
        assert_eq!(updated.inventory_variants.len(), 1);
        assert_eq!(
            updated.inventory_variants.first().map(|v| v.sku.as_str()),
            Some("SKU-00001-1")
        );
        assert_eq!(updated.stock, 1);
    }

    #[test]
    fn test_update_with_empty_sizes_keeps_size_rows_and_variants() {
        let store = store();
        let created = store.create_product(sized("Tee", &[2, 3]));

        let mut payload = input("Tee");
        payload.sizes = Some(Vec::new());
        let updated = store.update_product(created.id, payload).expect("exists");
        assert_eq!(updated.sizes, created.sizes);
        assert_eq!(updated.inventory_variants, created.inventory_variants);
        assert_eq!(updated.stock, 5);
    }

    #[test]
    fn test_update_unknown_returns_none() {
        let store = store();
        assert!(store.update_product(ProductId::new(9), input("X")).is_none());
        assert!(store.delete_product(ProductId::new(9)).is_none());
    }

    // =========================================================================
    // Media, related, ratings
    // =========================================================================

    #[test]
    fn test_remove_media_promotes_next_image() {
        let store = store();
        let mut payload = input("Pictured");
        payload.media = vec!["uploads/a.jpg".to_string(), "uploads/b.jpg".to_string()];
        let created = store.create_product(payload);

        let updated = store
            .remove_product_media(created.id, "http://localhost:3000/uploads/a.jpg")
            .expect("exists");
        assert_eq!(updated.media_refs, vec!["uploads/b.jpg".to_string()]);
        assert_eq!(updated.image_url, "http://localhost:3000/uploads/b.jpg");
    }

    #[test]
    fn test_remove_last_media_restores_placeholder() {
        let store = store();
        let mut payload = input("Pictured");
        payload.media = vec!["uploads/a.jpg".to_string()];
        let created = store.create_product(payload);

        let updated = store
            .remove_product_media(created.id, "uploads/a.jpg")
            .expect("exists");
        assert_eq!(updated.media_refs, vec!["uploads/placeholder.png".to_string()]);
    }

    #[test]
    fn test_related_products_drop_self_unknown_and_repeats() {
        let store = store();
        let a = store.create_product(input("A"));
        let b = store.create_product(input("B"));
        let c = store.create_product(input("C"));

        let updated = store
            .set_related_products(a.id, vec![c.id, a.id, ProductId::new(99), c.id, b.id])
            .expect("exists");
        assert_eq!(updated.related_products, vec![c.id, b.id]);
    }

    #[test]
    fn test_rating_is_clamped() {
        let store = store();
        let a = store.create_product(input("A"));
        let rated = store
            .rate_product(a.id, Decimal::from(9), 3)
            .expect("exists");
        assert_eq!(rated.rating, Some(Decimal::from(5)));
        let rated = store
            .rate_product(a.id, Decimal::from(-1), 3)
            .expect("exists");
        assert_eq!(rated.rating, Some(Decimal::ZERO));
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[test]
    fn test_filter_by_search_category_and_tab() {
        let store = store();
        let mut linen = input("Linen Shirt");
        linen.tags = vec!["summer".to_string()];
        let linen = store.create_product(linen);
        let mut boots = input("Boots");
        boots.category = "Shoes".to_string();
        store.create_product(boots);

        let query = ProductQuery::from_labels("SUMMER", "all", "all").expect("valid");
        let found: Vec<ProductId> = store.filter_products(&query).iter().map(|p| p.id).collect();
        assert_eq!(found, vec![linen.id]);

        let query = ProductQuery::from_labels("", "Shoes", "").expect("valid");
        assert_eq!(store.filter_products(&query).len(), 1);

        let query = ProductQuery::from_labels("sku-00001", "", "").expect("valid");
        assert_eq!(store.filter_products(&query).len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let store = store();
        for name in ["a", "b", "c"] {
            store.create_product(input(name));
        }
        let query = ProductQuery::default();
        assert_eq!(store.filter_products(&query), store.filter_products(&query));
    }

    #[test]
    fn test_filter_page_uses_configured_default_size() {
        let store = store();
        for i in 0..12 {
            store.create_product(input(&format!("p{i}")));
        }
        let page = store.filter_products_page(&ProductQuery::default(), PageRequest::new(0, 0));
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 12);

        let second = store.filter_products_page(&ProductQuery::default(), PageRequest::new(2, 0));
        assert_eq!(second.items.len(), 2);
    }
}
