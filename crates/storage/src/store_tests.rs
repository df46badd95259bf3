// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use flo_core::test_support::instance;

#[test]
fn commit_publishes_changes() {
    let store = Store::new();
    let mut txn = store.write();
    txn.upsert_instance(instance("web-1", "web"));
    assert_eq!(txn.commit(), 1);

    assert_eq!(store.read().instance_count(), 1);
    assert_eq!(store.generation(), 1);
}

#[test]
fn dropped_write_rolls_back() {
    let store = Store::new();
    {
        let mut txn = store.write();
        txn.upsert_instance(instance("web-1", "web"));
        assert_eq!(txn.instance_count(), 1);
    }
    assert_eq!(store.read().instance_count(), 0);
    assert_eq!(store.generation(), 0);
}

#[test]
fn readers_keep_their_snapshot() {
    let store = Store::new();
    let before = store.read();

    let mut txn = store.write();
    txn.upsert_instance(instance("web-1", "web"));
    // Uncommitted writes are invisible to new readers too
    assert_eq!(store.read().instance_count(), 0);
    txn.commit();

    assert_eq!(before.instance_count(), 0);
    assert_eq!(store.read().instance_count(), 1);
}

#[test]
fn writers_serialize() {
    let store = Arc::new(Store::new());
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..50 {
                    let mut txn = store.write();
                    txn.upsert_instance(instance(&format!("i-{n}-{i}"), "web"));
                    txn.commit();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.read().instance_count(), 400);
    assert_eq!(store.generation(), 400);
}

#[tokio::test]
async fn subscribers_observe_commits() {
    let store = Store::new();
    let mut rx = store.subscribe();
    assert_eq!(*rx.borrow_and_update(), 0);

    let mut txn = store.write();
    txn.upsert_instance(instance("web-1", "web"));
    txn.commit();

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);
}
