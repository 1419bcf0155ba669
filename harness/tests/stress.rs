//! Stress driver phases against the stub node.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubNode;
use hob_harness::assets::AssetId;
use hob_harness::{Account, Ladder, StressConfig, StressRunner};
use tokio_util::sync::CancellationToken;

fn ladder() -> Ladder {
    Ladder {
        base_asset: AssetId(1),
        quote_asset: AssetId(2),
        base_price: 1_000,
        tick_spacing: 5,
        tick_count: 10,
        amount_per_order: 1,
    }
}

fn fast_config(prefill: u64) -> StressConfig {
    let mut config = StressConfig::new(ladder())
        .with_prefill_orders(prefill)
        .with_limit_workers(1)
        .with_market_workers(1)
        .with_batch_ticks(2);
    config.prefill_pacing = Duration::ZERO;
    config.order_pacing = Duration::ZERO;
    config.batch_pause = Duration::from_millis(1);
    config.error_backoff = Duration::from_millis(1);
    config
}

#[tokio::test]
async fn prefill_reaches_target_then_cancel_stops_the_run() {
    let api = Arc::new(StubNode::with_chain_nonce(0));
    let runner =
        StressRunner::new(Arc::clone(&api), Account::bob(), Account::alice(), fast_config(25));
    let stats = runner.stats();
    let shutdown = CancellationToken::new();

    let token = shutdown.clone();
    let handle = tokio::spawn(async move { runner.run(token).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    // At least the prefill target made it out; workers added more on top.
    assert!(stats.submitted() >= 25, "only {} orders submitted", stats.submitted());
    assert_eq!(stats.failed(), 0);
}

#[tokio::test]
async fn cancelled_before_start_submits_nothing_after_prefill_skips() {
    let api = Arc::new(StubNode::with_chain_nonce(0));
    let runner =
        StressRunner::new(Arc::clone(&api), Account::bob(), Account::alice(), fast_config(50));
    let stats = runner.stats();
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    runner.run(shutdown).await.unwrap();
    assert_eq!(stats.submitted(), 0);
}
