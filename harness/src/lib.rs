#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod accounts;
pub mod assets;
pub mod bootstrap;
pub mod calls;
pub mod chain;
pub mod error;
pub mod nonce;
pub mod orders;
pub mod pool;
pub mod price;
pub mod stats;
pub mod stress;
pub mod submit;

pub use accounts::Account;
pub use chain::{ChainApi, ChainClient, Dispatch};
pub use error::ChainError;
pub use nonce::NonceAllocator;
pub use orders::{Ladder, MarketOrder, OrderRequest, Side};
pub use stats::Stats;
pub use stress::{StressConfig, StressRunner};
