//! Many threads sharing one catalog store.

use std::collections::BTreeSet;
use std::thread;

use rust_decimal::Decimal;

use storekeep_admin::models::{ProductInput, ProductQuery};
use storekeep_core::{CategoryId, OrderStatus, ProductId};
use storekeep_integration_tests::{category, order, stocked_product, test_store};

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

// ============================================================================
// Id allocation
// ============================================================================

#[test]
fn test_concurrent_creates_get_unique_sequential_ids() {
    let store = test_store();

    let ids: Vec<ProductId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = &store;
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            store
                                .create_product(stocked_product(&format!("t{t}-{i}"), "Bulk", &[1]))
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    let total = THREADS * PER_THREAD;
    let unique: BTreeSet<u32> = ids.iter().map(ProductId::as_u32).collect();
    assert_eq!(unique.len(), total);
    let expected: BTreeSet<u32> = (1..=u32::try_from(total).expect("fits")).collect();
    assert_eq!(unique, expected);

    let skus: BTreeSet<String> = store.products().into_iter().map(|p| p.sku).collect();
    assert_eq!(skus.len(), total);
}

#[test]
fn test_concurrent_category_creates_keep_ranks_dense() {
    let store = test_store();
    let root = store.create_category(category("Root", None)).expect("root");

    let ids: Vec<CategoryId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = &store;
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            store
                                .create_category(category(&format!("c{t}-{i}"), Some(root.id)))
                                .expect("parent exists")
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    let total = u32::try_from(THREADS * PER_THREAD).expect("fits");
    assert_eq!(root.id.as_u32(), 1);
    let unique: BTreeSet<u32> = ids.iter().map(CategoryId::as_u32).collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(unique, (2..=total + 1).collect::<BTreeSet<u32>>());

    let mut ranks: Vec<u32> = store
        .categories()
        .into_iter()
        .filter(|c| c.parent_id == Some(root.id))
        .map(|c| c.sort_order)
        .collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=total).collect();
    assert_eq!(ranks, expected);
}

// ============================================================================
// Readers never observe partial writes
// ============================================================================

#[test]
fn test_readers_see_consistent_derived_fields() {
    let store = test_store();
    let seed = store.create_product(stocked_product("Flip", "Shirts", &[1]));

    thread::scope(|scope| {
        let writer = scope.spawn(|| {
            for round in 0..200u32 {
                let inventory = round % 3;
                let mut input = stocked_product("Flip", "Shirts", &[inventory]);
                input.active = round % 2 == 0;
                store.update_product(seed.id, input).expect("exists");
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let product = store.product(seed.id).expect("exists");
                    let stock: u32 = product.inventory_variants.iter().map(|v| v.inventory).sum();
                    assert_eq!(product.stock, stock);
                    assert_eq!(
                        product.status,
                        storekeep_core::ProductStatus::resolve(product.active, product.stock)
                    );
                }
            });
        }

        writer.join().expect("writer panicked");
    });
}

#[test]
fn test_mixed_workload_dashboard_matches_ledger() {
    let store = test_store();

    thread::scope(|scope| {
        for t in 0..THREADS {
            let store = &store;
            scope.spawn(move || {
                for i in 0..PER_THREAD {
                    let status = if i % 5 == 0 {
                        OrderStatus::Refund
                    } else {
                        OrderStatus::Delivered
                    };
                    store.create_order(order(&format!("Customer {t}"), 10, status));
                    let _ = store.dashboard_stats();
                    let _ = store.filter_products(&ProductQuery::default());
                }
            });
        }
        scope.spawn(|| {
            for i in 0..PER_THREAD {
                store.create_product(ProductInput {
                    name: format!("Side {i}"),
                    base_price: Decimal::ONE,
                    ..ProductInput::default()
                });
            }
        });
    });

    let stats = store.dashboard_stats();
    let orders = store.orders();
    assert_eq!(stats.total_orders, THREADS * PER_THREAD);
    assert_eq!(orders.len(), THREADS * PER_THREAD);
    assert_eq!(stats.total_revenue, Decimal::from(10 * THREADS * PER_THREAD));
    assert_eq!(stats.status_counts.refund, THREADS * PER_THREAD / 5);
    assert_eq!(stats.return_rate, Decimal::from(20));
    assert_eq!(stats.products.total, PER_THREAD);

    let numbers: BTreeSet<String> = orders.into_iter().map(|o| o.order_number).collect();
    assert_eq!(numbers.len(), THREADS * PER_THREAD);
}
