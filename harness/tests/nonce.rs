//! Allocator issuance properties under concurrent callers.

mod common;

use std::collections::BTreeSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::StubNode;
use hob_harness::NonceAllocator;
use subxt::utils::AccountId32;
use tokio::task::JoinSet;

fn account() -> AccountId32 {
    AccountId32([7u8; 32])
}

#[tokio::test]
async fn init_reads_node_value() {
    let api = Arc::new(StubNode::with_chain_nonce(11));
    let allocator = NonceAllocator::init(Arc::clone(&api), account()).await.unwrap();
    assert_eq!(allocator.next().await, 11);
}

#[tokio::test]
async fn concurrent_issuance_is_dense_and_unique() {
    const WORKERS: u64 = 8;
    const PER_WORKER: u64 = 50;
    const START: u64 = 1_000;

    let api = Arc::new(StubNode::with_chain_nonce(START));
    let allocator = Arc::new(NonceAllocator::init(Arc::clone(&api), account()).await.unwrap());

    let mut tasks = JoinSet::new();
    for _ in 0..WORKERS {
        let allocator = Arc::clone(&allocator);
        tasks.spawn(async move {
            let mut issued = Vec::with_capacity(PER_WORKER as usize);
            for _ in 0..PER_WORKER {
                issued.push(allocator.next().await);
            }
            issued
        });
    }

    let mut all = BTreeSet::new();
    while let Some(joined) = tasks.join_next().await {
        for nonce in joined.unwrap() {
            assert!(all.insert(nonce), "nonce {nonce} issued twice");
        }
    }

    // The union is exactly the contiguous range: no duplicates, no gaps.
    let expected: BTreeSet<u64> = (START..START + WORKERS * PER_WORKER).collect();
    assert_eq!(all, expected);
}

#[tokio::test]
async fn resync_adopts_node_value() {
    let api = Arc::new(StubNode::with_chain_nonce(5));
    let allocator = NonceAllocator::init(Arc::clone(&api), account()).await.unwrap();

    assert_eq!(allocator.next().await, 5);
    assert_eq!(allocator.next().await, 6);

    // The chain moved on without us; buffered increments must be discarded.
    api.chain_nonce.store(42, Ordering::SeqCst);
    assert_eq!(allocator.resync().await.unwrap(), 42);
    assert_eq!(allocator.next().await, 42);
    assert_eq!(allocator.next().await, 43);
}

#[tokio::test]
async fn resync_can_move_the_counter_backwards() {
    let api = Arc::new(StubNode::with_chain_nonce(100));
    let allocator = NonceAllocator::init(Arc::clone(&api), account()).await.unwrap();
    for _ in 0..10 {
        allocator.next().await;
    }

    api.chain_nonce.store(103, Ordering::SeqCst);
    allocator.resync().await.unwrap();
    assert_eq!(allocator.next().await, 103);
}
