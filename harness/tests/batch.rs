//! Batch submission failure containment.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubNode;
use hob_harness::assets::AssetId;
use hob_harness::submit::submit_batch;
use hob_harness::{Dispatch, Ladder, NonceAllocator, Stats};
use subxt::utils::AccountId32;
use subxt_signer::sr25519::dev;
use tokio_util::sync::CancellationToken;

fn ladder() -> Ladder {
    Ladder {
        base_asset: AssetId(1),
        quote_asset: AssetId(2),
        base_price: 100,
        tick_spacing: 5,
        tick_count: 3,
        amount_per_order: 10,
    }
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let api = Arc::new(StubNode::with_chain_nonce(0).fail_submission(2));
    let allocator = NonceAllocator::init(Arc::clone(&api), AccountId32([1u8; 32])).await.unwrap();
    let orders = ladder().orders();
    let stats = Stats::new();
    let shutdown = CancellationToken::new();

    let outcome = submit_batch(
        api.as_ref(),
        &allocator,
        &dev::alice(),
        &orders,
        Dispatch::Submit,
        Duration::ZERO,
        &stats,
        &shutdown,
    )
    .await;

    // Six orders: one rejected, the remaining five still attempted.
    assert_eq!(outcome.attempted, 6);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.submitted, 5);
    assert_eq!(stats.submitted(), 5);
    assert_eq!(stats.failed(), 1);
    // The failed order consumed its nonce; later orders carry on past it.
    assert_eq!(*api.seen_nonces.lock().unwrap(), vec![0, 1, 3, 4, 5]);
}

#[tokio::test]
async fn inclusion_mode_counts_receipts() {
    let api = Arc::new(StubNode::with_chain_nonce(0));
    let allocator = NonceAllocator::init(Arc::clone(&api), AccountId32([1u8; 32])).await.unwrap();
    let orders = ladder().orders();
    let stats = Stats::new();
    let shutdown = CancellationToken::new();

    let outcome = submit_batch(
        api.as_ref(),
        &allocator,
        &dev::alice(),
        &orders,
        Dispatch::WaitForInclusion,
        Duration::ZERO,
        &stats,
        &shutdown,
    )
    .await;

    assert_eq!(outcome.submitted, 6);
    assert_eq!(stats.included(), 6);
}

#[tokio::test]
async fn cancellation_stops_the_batch_before_it_starts() {
    let api = Arc::new(StubNode::with_chain_nonce(0));
    let allocator = NonceAllocator::init(Arc::clone(&api), AccountId32([1u8; 32])).await.unwrap();
    let orders = ladder().orders();
    let stats = Stats::new();
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let outcome = submit_batch(
        api.as_ref(),
        &allocator,
        &dev::alice(),
        &orders,
        Dispatch::Submit,
        Duration::ZERO,
        &stats,
        &shutdown,
    )
    .await;

    assert_eq!(outcome.attempted, 0);
    assert!(api.seen_nonces.lock().unwrap().is_empty());
}
