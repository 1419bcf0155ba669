//! CLI argument definitions for the bench binary.

use clap::Parser;

/// Drives a dev chain's orderbook pallet: ladders, pools, liquidity, stress load.
#[derive(Debug, Clone, Parser)]
#[command(name = "hob-bench", about = "Exercise an orderbook dev chain")]
pub(crate) struct BenchArgs {
    /// WebSocket URL of the node.
    #[arg(long, default_value = "ws://127.0.0.1:9944")]
    pub url: String,

    /// Signing account secret URI or mnemonic (pool and liquidity modes).
    #[arg(long, default_value = "//Alice")]
    pub account_seed: String,

    /// Base asset id.
    #[arg(long)]
    pub base_asset: Option<u32>,

    /// Quote asset id.
    #[arg(long)]
    pub quote_asset: Option<u32>,

    /// Base price in smallest quote units.
    #[arg(long)]
    pub base_price: Option<u128>,

    /// Orders to create on each side of the base price.
    #[arg(long, default_value = "10")]
    pub tick_count: u32,

    /// Price spacing between ticks in smallest quote units.
    #[arg(long)]
    pub tick_spacing: Option<u128>,

    /// Amount per order in smallest base units.
    #[arg(long)]
    pub amount: Option<u128>,

    /// Provision test assets and balances, then exit.
    #[arg(long)]
    pub bootstrap: bool,

    /// Seed of the account funded during bootstrap.
    #[arg(long)]
    pub test_account_seed: Option<String>,

    /// Register a new trading pool, then exit.
    #[arg(long)]
    pub create_pool: bool,

    /// Base asset decimals.
    #[arg(long)]
    pub base_decimals: Option<u8>,

    /// Quote asset decimals.
    #[arg(long)]
    pub quote_decimals: Option<u8>,

    /// Taker fee rate in percent (0.03 means 0.03%).
    #[arg(long)]
    pub taker_fee_rate: Option<f64>,

    /// Minimum price movement for the pool.
    #[arg(long)]
    pub tick_size: Option<u128>,

    /// Minimum trading amount for the pool.
    #[arg(long)]
    pub lot_size: Option<u128>,

    /// Pool token decimals.
    #[arg(long)]
    pub pool_decimals: Option<u8>,

    /// Deposit paired liquidity into a pool, then exit.
    #[arg(long)]
    pub add_liquidity: bool,

    /// Whole DOT tokens to deposit as base-side liquidity.
    #[arg(long)]
    pub dot_amount: Option<f64>,

    /// DOT price in USDT used to size the quote side.
    #[arg(long, default_value = "4.0")]
    pub dot_price: f64,

    /// Re-price the quote side from the live feed instead of --dot-price.
    #[arg(long)]
    pub use_live_price: bool,

    /// Run the concurrent load generator until interrupted.
    #[arg(long)]
    pub stress_test: bool,

    /// Ticks per side for stress batches.
    #[arg(long, default_value = "10")]
    pub tick_range: u32,

    /// Concurrent limit-order workers for the stress run.
    #[arg(long, default_value = "2")]
    pub limit_workers: usize,

    /// Concurrent market-order workers for the stress run.
    #[arg(long, default_value = "2")]
    pub market_workers: usize,

    /// Limit orders to rest on the book before sustained load.
    #[arg(long, default_value = "100")]
    pub prefill_orders: u64,

    /// Print chain head info and recent blocks, then exit.
    #[arg(long)]
    pub health: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, short = 'v', default_value = "info")]
    pub log_level: String,
}
