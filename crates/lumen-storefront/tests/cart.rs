mod common;

use common::{product, storefront, RecordingGateway, ScriptedSource};
use lumen_cache::{Cache, CART_KEY};
use lumen_commerce::prelude::*;
use lumen_storefront::{CartStore, NoticeLevel};
use std::sync::Arc;

#[test]
fn test_add_update_scenario() {
    let store = CartStore::open(Cache::in_memory());
    assert!(store.is_empty());

    store.add(product(1, 1000));
    store.add(product(2, 2000));
    store.update_quantity(ProductId::new(1), 3);

    let cart = store.snapshot();
    let entries: Vec<(u64, u32)> = cart
        .items()
        .iter()
        .map(|e| (e.product.id.get(), e.quantity))
        .collect();
    assert_eq!(entries, vec![(1, 3), (2, 1)]);
    assert_eq!(store.total_items(), 4);
    assert_eq!(store.total_price().unwrap(), Money::from_major(5000));
    assert_eq!(store.distinct_count(), 2);
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let store = CartStore::open(Cache::open(dir.path()).unwrap());
        store.add(product(1, 1000));
        store.add(product(1, 1000));
        store.add(product(5, 4500));
        store.decrement(ProductId::new(1));
        store.snapshot()
    };

    let store = CartStore::open(Cache::open(dir.path()).unwrap());
    let after = store.snapshot();
    assert_eq!(after.items(), before.items());
    assert_eq!(store.total_price().unwrap(), Money::from_major(5500));
}

#[test]
fn test_restored_duplicates_are_merged() {
    let cache = Cache::in_memory();
    let raw = serde_json::json!({
        "items": [
            {"product": {"id": 1, "name": "Люстра", "category": "chandeliers", "price": 1000}, "quantity": 1},
            {"product": {"id": 1, "name": "Люстра", "category": "chandeliers", "price": 1000}, "quantity": 2},
            {"product": {"id": 2, "name": "Бра", "category": "wall", "price": 500}, "quantity": 0}
        ]
    });
    cache.set(CART_KEY, &raw).unwrap();

    let store = CartStore::open(cache);
    assert_eq!(store.distinct_count(), 1);
    assert_eq!(store.quantity_of(ProductId::new(1)), 3);
}

#[test]
fn test_add_to_cart_notice() {
    let storefront = storefront(
        Cache::in_memory(),
        Arc::new(ScriptedSource::default()),
        Arc::new(RecordingGateway::default()),
    );
    let notice = storefront.add_to_cart(product(3, 800));
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.description.as_deref(), Some("Светильник 3"));
    assert_eq!(storefront.cart().quantity_of(ProductId::new(3)), 1);
}

#[test]
fn test_stock_is_not_enforced() {
    let store = CartStore::open(Cache::in_memory());
    let scarce = product(9, 100).with_stock(1);
    store.add(scarce.clone());
    store.add(scarce);
    assert_eq!(store.quantity_of(ProductId::new(9)), 2);
}
