//! Orderbook bench binary: mode selection and wiring.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cli::BenchArgs;
use eyre::Result;
use hob_harness::assets::AssetId;
use hob_harness::bootstrap;
use hob_harness::calls::PoolParams;
use hob_harness::pool::{self, LiquidityAmounts};
use hob_harness::submit::submit_batch;
use hob_harness::{
    Account, ChainClient, Dispatch, Ladder, NonceAllocator, Stats, StressConfig, StressRunner,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Pause between dispatches in the one-shot ladder mode.
const LADDER_PACING: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    let args = BenchArgs::parse();
    setup_logging(&args.log_level);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_token.cancel();
        }
    });

    if args.stress_test {
        run_stress(&args, shutdown).await
    } else if args.create_pool {
        run_create_pool(&args).await
    } else if args.add_liquidity {
        run_add_liquidity(&args).await
    } else if args.bootstrap {
        run_bootstrap(&args).await
    } else if args.health {
        run_health(&args).await
    } else {
        run_ladder(&args, shutdown).await
    }
}

fn setup_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry().with(fmt::layer().with_target(true)).with(filter).init();
}

/// Builds the ladder from the shared flags, or reports what is missing.
fn ladder_from_args(args: &BenchArgs, tick_count: u32) -> Option<Ladder> {
    let (Some(base_asset), Some(quote_asset), Some(base_price), Some(tick_spacing), Some(amount)) =
        (args.base_asset, args.quote_asset, args.base_price, args.tick_spacing, args.amount)
    else {
        error!(
            "required: --base-asset, --quote-asset, --base-price, --tick-spacing, --amount"
        );
        return None;
    };
    Some(Ladder {
        base_asset: AssetId(base_asset),
        quote_asset: AssetId(quote_asset),
        base_price,
        tick_spacing,
        tick_count,
        amount_per_order: amount,
    })
}

/// Default mode: place a symmetric ladder of limit orders, waiting on each.
async fn run_ladder(args: &BenchArgs, shutdown: CancellationToken) -> Result<()> {
    let Some(ladder) = ladder_from_args(args, args.tick_count) else {
        return Ok(());
    };
    let account = Account::alice();
    let api = Arc::new(ChainClient::connect(&args.url).await?);
    let allocator = NonceAllocator::init(Arc::clone(&api), account.id().clone()).await?;
    let stats = Stats::new();
    let orders = ladder.orders();
    info!(orders = orders.len(), account = %account.address(), "placing limit order ladder");
    let outcome = submit_batch(
        api.as_ref(),
        &allocator,
        account.signer(),
        &orders,
        Dispatch::WaitForInclusion,
        LADDER_PACING,
        &stats,
        &shutdown,
    )
    .await;
    info!(submitted = outcome.submitted, failed = outcome.failed, "ladder complete");
    Ok(())
}

async fn run_bootstrap(args: &BenchArgs) -> Result<()> {
    let Some(seed) = args.test_account_seed.as_deref() else {
        error!("required: --test-account-seed");
        return Ok(());
    };
    let sudo = Account::alice();
    let test_account = Account::from_uri(seed)?;
    let api = Arc::new(ChainClient::connect(&args.url).await?);
    bootstrap::run(&api, &sudo, &test_account).await?;
    Ok(())
}

async fn run_create_pool(args: &BenchArgs) -> Result<()> {
    let (
        Some(base_asset),
        Some(base_decimals),
        Some(quote_asset),
        Some(quote_decimals),
        Some(taker_fee_rate),
        Some(tick_size),
        Some(lot_size),
        Some(pool_decimals),
    ) = (
        args.base_asset,
        args.base_decimals,
        args.quote_asset,
        args.quote_decimals,
        args.taker_fee_rate,
        args.tick_size,
        args.lot_size,
        args.pool_decimals,
    )
    else {
        error!(
            "required: --base-asset, --base-decimals, --quote-asset, --quote-decimals, \
             --taker-fee-rate, --tick-size, --lot-size, --pool-decimals"
        );
        return Ok(());
    };
    let account = Account::from_uri(&args.account_seed)?;
    let api = ChainClient::connect(&args.url).await?;
    let params = PoolParams {
        base_asset: AssetId(base_asset),
        base_decimals,
        quote_asset: AssetId(quote_asset),
        quote_decimals,
        taker_fee_rate,
        tick_size,
        lot_size,
        pool_decimals,
    };
    pool::create_pool(&api, &account, &params).await?;
    Ok(())
}

async fn run_add_liquidity(args: &BenchArgs) -> Result<()> {
    let (Some(base_asset), Some(quote_asset), Some(dot_amount)) =
        (args.base_asset, args.quote_asset, args.dot_amount)
    else {
        error!("required: --base-asset, --quote-asset, --dot-amount");
        return Ok(());
    };
    let account = Account::from_uri(&args.account_seed)?;
    let api = ChainClient::connect(&args.url).await?;
    let amounts = LiquidityAmounts::from_base_amount(dot_amount, args.dot_price);
    pool::add_liquidity(
        &api,
        &account,
        AssetId(base_asset),
        AssetId(quote_asset),
        amounts,
        args.use_live_price,
    )
    .await?;
    Ok(())
}

async fn run_health(args: &BenchArgs) -> Result<()> {
    let api = ChainClient::connect(&args.url).await?;
    api.health_check(5).await?;
    Ok(())
}

async fn run_stress(args: &BenchArgs, shutdown: CancellationToken) -> Result<()> {
    let Some(ladder) = ladder_from_args(args, args.tick_range) else {
        return Ok(());
    };
    let api = Arc::new(ChainClient::connect(&args.url).await?);
    let config = StressConfig::new(ladder)
        .with_prefill_orders(args.prefill_orders)
        .with_limit_workers(args.limit_workers)
        .with_market_workers(args.market_workers);
    let runner = StressRunner::new(api, Account::bob(), Account::alice(), config);
    let stats = runner.stats();
    runner.run(shutdown).await?;
    info!(
        submitted = stats.submitted(),
        failed = stats.failed(),
        success_rate = stats.success_rate(),
        "stress test finished"
    );
    Ok(())
}
