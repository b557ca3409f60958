mod common;

use common::make_form;
use finance_tracker::models::{TransactionId, TransactionType};
use finance_tracker::persistence::MemoryPersistence;
use finance_tracker::store::TransactionStore;
use rust_decimal_macros::dec;

/// Subscribers see the new revision after a mutation
#[tokio::test]
async fn test_subscriber_notified_on_add() {
    let mut store = TransactionStore::open(MemoryPersistence::new());
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    store.add(make_form(TransactionType::Income, "Pay", dec!(100), "Salary", "2024-01-01"));

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);
}

/// No-op mutations leave subscribers untouched
#[test]
fn test_noop_does_not_notify() {
    let mut store = TransactionStore::open(MemoryPersistence::new());
    let rx = store.subscribe();

    store.delete(&TransactionId::from("missing"));

    assert!(!rx.has_changed().unwrap());
}

/// A subscriber only sees the latest revision, not every intermediate one
#[test]
fn test_subscriber_sees_latest_revision() {
    let mut store = TransactionStore::open(MemoryPersistence::new());
    let mut rx = store.subscribe();

    let form = make_form(TransactionType::Expense, "Tea", dec!(2), "Food", "2024-01-01");
    let id = store.add(form.clone());
    store.add(form);
    store.delete(&id);

    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 3);
    assert_eq!(store.revision(), 3);
    assert!(!rx.has_changed().unwrap());
}

/// Several independent subscribers each get notified
#[tokio::test]
async fn test_multiple_subscribers() {
    let mut store = TransactionStore::open(MemoryPersistence::new());
    let mut first = store.subscribe();
    let mut second = store.subscribe();

    store.add(make_form(TransactionType::Expense, "Tea", dec!(2), "Food", "2024-01-01"));

    first.changed().await.unwrap();
    second.changed().await.unwrap();
    assert_eq!(*first.borrow(), *second.borrow());
}
