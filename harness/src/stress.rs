//! Two-phase load generator: prefill, then sustained concurrent order flow.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::accounts::Account;
use crate::chain::{ChainApi, Dispatch};
use crate::error::ChainError;
use crate::nonce::NonceAllocator;
use crate::orders::{Ladder, MarketOrder, Side};
use crate::stats::Stats;
use crate::submit::{submit_batch, submit_market};

/// Configuration for the stress generator.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Ladder shape shared by the prefill phase and the limit workers.
    pub ladder: Ladder,
    /// Ticks per side for each sustained-phase batch.
    pub batch_ticks: u32,
    /// Limit orders to rest on the book before sustained load starts.
    pub prefill_orders: u64,
    /// Concurrent limit-order workers.
    pub limit_workers: usize,
    /// Concurrent market-order workers.
    pub market_workers: usize,
    /// Quantity per market order.
    pub market_quantity: u128,
    /// Delay between consecutive dispatches in the prefill phase.
    pub prefill_pacing: Duration,
    /// Delay between consecutive dispatches from one worker.
    pub order_pacing: Duration,
    /// Pause between batches from one worker.
    pub batch_pause: Duration,
    /// Pause before a worker resumes after a batch error.
    pub error_backoff: Duration,
}

impl StressConfig {
    /// Defaults sized for a light local run.
    pub fn new(ladder: Ladder) -> Self {
        Self {
            ladder,
            batch_ticks: 10,
            prefill_orders: 100,
            limit_workers: 2,
            market_workers: 2,
            market_quantity: 1_000_000_000,
            prefill_pacing: Duration::from_millis(200),
            order_pacing: Duration::from_millis(500),
            batch_pause: Duration::from_secs(1),
            error_backoff: Duration::from_secs(1),
        }
    }

    /// Sets the prefill target.
    pub fn with_prefill_orders(mut self, n: u64) -> Self {
        self.prefill_orders = n;
        self
    }

    /// Sets the number of limit-order workers.
    pub fn with_limit_workers(mut self, n: usize) -> Self {
        self.limit_workers = n;
        self
    }

    /// Sets the number of market-order workers.
    pub fn with_market_workers(mut self, n: usize) -> Self {
        self.market_workers = n;
        self
    }

    /// Sets the ticks per side for sustained-phase batches.
    pub fn with_batch_ticks(mut self, n: u32) -> Self {
        self.batch_ticks = n;
        self
    }
}

/// Drives the two stress phases against one maker and one taker account.
///
/// The maker rests limit orders, the taker sweeps them with market orders.
/// Each account has its own nonce allocator; the two never share a lock.
pub struct StressRunner<A> {
    api: Arc<A>,
    maker: Account,
    taker: Account,
    config: StressConfig,
    stats: Arc<Stats>,
}

impl<A: ChainApi + 'static> StressRunner<A> {
    /// Creates a runner over the given node handle and accounts.
    pub fn new(api: Arc<A>, maker: Account, taker: Account, config: StressConfig) -> Self {
        Self { api, maker, taker, config, stats: Arc::new(Stats::new()) }
    }

    /// Shared handle to the statistics collector.
    pub fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }

    /// Runs the prefill phase, then sustained workers until `shutdown` fires.
    ///
    /// Worker failures stay local: a worker backs off, resyncs its account's
    /// allocator, and resumes. Only cancellation ends the run.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), ChainError> {
        let maker_alloc =
            Arc::new(NonceAllocator::init(Arc::clone(&self.api), self.maker.id().clone()).await?);

        self.prefill(&maker_alloc, &shutdown).await;
        if shutdown.is_cancelled() {
            return Ok(());
        }

        let taker_alloc =
            Arc::new(NonceAllocator::init(Arc::clone(&self.api), self.taker.id().clone()).await?);

        info!(
            limit_workers = self.config.limit_workers,
            market_workers = self.config.market_workers,
            "starting sustained load"
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.limit_workers {
            workers.spawn(limit_worker(
                Arc::clone(&self.api),
                Arc::clone(&maker_alloc),
                self.maker.clone(),
                self.config.clone(),
                Arc::clone(&self.stats),
                shutdown.clone(),
                worker_id,
            ));
        }
        for worker_id in 0..self.config.market_workers {
            workers.spawn(market_worker(
                Arc::clone(&self.api),
                Arc::clone(&taker_alloc),
                self.taker.clone(),
                self.config.clone(),
                Arc::clone(&self.stats),
                shutdown.clone(),
                worker_id,
            ));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "worker task aborted");
            }
        }

        info!(
            submitted = self.stats.submitted(),
            failed = self.stats.failed(),
            "stress run stopped"
        );
        Ok(())
    }

    /// Rests limit orders on the book until the target count is reached.
    async fn prefill(&self, allocator: &Arc<NonceAllocator<A>>, shutdown: &CancellationToken) {
        let cfg = &self.config;
        let target = cfg.prefill_orders;
        info!(target, account = %self.maker.address(), "prefilling order book");

        let mut placed: u64 = 0;
        while placed < target && !shutdown.is_cancelled() {
            let ladder = cfg.ladder.jittered();
            let mut orders = ladder.orders();
            orders.truncate((target - placed) as usize);
            let outcome = submit_batch(
                self.api.as_ref(),
                allocator,
                self.maker.signer(),
                &orders,
                Dispatch::Submit,
                cfg.prefill_pacing,
                &self.stats,
                shutdown,
            )
            .await;
            placed += outcome.submitted;
            if outcome.failed > 0 {
                warn!(failed = outcome.failed, "prefill batch saw failures, resyncing nonce");
                sleep(cfg.error_backoff).await;
                if let Err(e) = allocator.resync().await {
                    warn!(error = %e, "nonce resync failed");
                }
            }
        }
        info!(placed, "prefill complete");
    }
}

/// Loops jittered ladder batches from the maker account until cancelled.
async fn limit_worker<A: ChainApi>(
    api: Arc<A>,
    allocator: Arc<NonceAllocator<A>>,
    account: Account,
    config: StressConfig,
    stats: Arc<Stats>,
    shutdown: CancellationToken,
    worker_id: usize,
) {
    info!(worker_id, account = %account.address(), "limit worker started");
    loop {
        if shutdown.is_cancelled() {
            break;
        }
        let ladder =
            Ladder { tick_count: config.batch_ticks, ..config.ladder }.jittered();
        let orders = ladder.orders();
        let outcome = submit_batch(
            api.as_ref(),
            &allocator,
            account.signer(),
            &orders,
            Dispatch::Submit,
            config.order_pacing,
            &stats,
            &shutdown,
        )
        .await;
        if outcome.failed > 0 {
            warn!(worker_id, failed = outcome.failed, "batch saw failures, resyncing nonce");
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = sleep(config.error_backoff) => {}
            }
            if let Err(e) = allocator.resync().await {
                warn!(worker_id, error = %e, "nonce resync failed");
            }
            continue;
        }
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep(config.batch_pause) => {}
        }
    }
    info!(worker_id, "limit worker stopped");
}

/// Loops single market orders from the taker account until cancelled.
async fn market_worker<A: ChainApi>(
    api: Arc<A>,
    allocator: Arc<NonceAllocator<A>>,
    account: Account,
    config: StressConfig,
    stats: Arc<Stats>,
    shutdown: CancellationToken,
    worker_id: usize,
) {
    info!(worker_id, account = %account.address(), "market worker started");
    loop {
        if shutdown.is_cancelled() {
            break;
        }
        let order = MarketOrder {
            side: random_side(),
            quantity: config.market_quantity,
            base_asset: config.ladder.base_asset,
            quote_asset: config.ladder.quote_asset,
        };
        match submit_market(api.as_ref(), &allocator, account.signer(), &order, &stats).await {
            Ok(hash) => {
                info!(worker_id, side = ?order.side, %hash, "market order submitted");
            }
            Err(e) => {
                warn!(worker_id, error = %e, "market order failed, resyncing nonce");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = sleep(config.error_backoff) => {}
                }
                if let Err(e) = allocator.resync().await {
                    warn!(worker_id, error = %e, "nonce resync failed");
                }
            }
        }
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep(config.batch_pause) => {}
        }
    }
    info!(worker_id, "market worker stopped");
}

/// Uniformly random book side for market-order flow.
fn random_side() -> Side {
    if rand::rng().random_bool(0.5) { Side::Bid } else { Side::Ask }
}
