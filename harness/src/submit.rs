//! Paced order submission with per-order failure containment.

use std::time::Duration;

use subxt::utils::H256;
use subxt_signer::sr25519::Keypair;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::calls;
use crate::chain::{ChainApi, Dispatch};
use crate::error::ChainError;
use crate::nonce::NonceAllocator;
use crate::orders::{MarketOrder, OrderRequest};
use crate::stats::Stats;

/// Outcome of a batch submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Orders attempted.
    pub attempted: u64,
    /// Orders the node's pool accepted.
    pub submitted: u64,
    /// Orders that failed to dispatch and were skipped.
    pub failed: u64,
}

/// Submits each order in turn, skipping individual failures.
///
/// A fixed pacing delay separates consecutive dispatches from the same
/// caller so the node is not overwhelmed. Returns early when `shutdown`
/// fires; already-dispatched orders are not recalled.
#[allow(clippy::too_many_arguments)]
pub async fn submit_batch<A: ChainApi>(
    api: &A,
    allocator: &NonceAllocator<A>,
    signer: &Keypair,
    orders: &[OrderRequest],
    mode: Dispatch,
    pacing: Duration,
    stats: &Stats,
    shutdown: &CancellationToken,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for order in orders {
        if shutdown.is_cancelled() {
            break;
        }
        outcome.attempted += 1;
        let nonce = allocator.next().await;
        let call = calls::limit_order(order);
        match api.submit(&call, signer, nonce, mode).await {
            Ok(hash) => {
                outcome.submitted += 1;
                stats.record_submitted();
                if mode == Dispatch::WaitForInclusion {
                    stats.record_included();
                }
                info!(side = ?order.side, price = order.price, %hash, "order placed");
            }
            Err(e) => {
                outcome.failed += 1;
                stats.record_failed();
                warn!(side = ?order.side, price = order.price, error = %e, "order failed, skipping");
            }
        }
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep(pacing) => {}
        }
    }
    outcome
}

/// Submits one market order, fire-and-forget.
pub async fn submit_market<A: ChainApi>(
    api: &A,
    allocator: &NonceAllocator<A>,
    signer: &Keypair,
    order: &MarketOrder,
    stats: &Stats,
) -> Result<H256, ChainError> {
    let nonce = allocator.next().await;
    let call = calls::market_order(order);
    match api.submit(&call, signer, nonce, Dispatch::Submit).await {
        Ok(hash) => {
            stats.record_submitted();
            Ok(hash)
        }
        Err(e) => {
            stats.record_failed();
            Err(e)
        }
    }
}
