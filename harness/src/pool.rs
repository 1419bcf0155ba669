//! Pool registration and liquidity provisioning.

use subxt::utils::H256;
use tracing::info;

use crate::accounts::Account;
use crate::assets::{unit, AssetId, DOT_DECIMALS, USDT_DECIMALS};
use crate::calls::{self, PoolParams};
use crate::chain::{ChainApi, Dispatch};
use crate::error::ChainError;
use crate::price;

/// Registers a new trading pool.
pub async fn create_pool<A: ChainApi>(
    api: &A,
    account: &Account,
    params: &PoolParams,
) -> Result<H256, ChainError> {
    info!(
        base_asset = params.base_asset.0,
        quote_asset = params.quote_asset.0,
        taker_fee_permill = params.taker_fee_permill(),
        tick_size = params.tick_size,
        lot_size = params.lot_size,
        "creating pool"
    );
    let call = calls::create_pool(params);
    let nonce = api.account_next_index(account.id()).await?;
    let hash = api.submit(&call, account.signer(), nonce, Dispatch::WaitForInclusion).await?;
    info!(%hash, "pool created");
    Ok(hash)
}

/// Liquidity amounts in smallest units for both sides of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAmounts {
    /// Base-side amount in smallest base units.
    pub base: u128,
    /// Quote-side amount in smallest quote units.
    pub quote: u128,
}

impl LiquidityAmounts {
    /// Converts a whole-token base amount at `price` into paired smallest units.
    pub fn from_base_amount(base_tokens: f64, price: f64) -> Self {
        let base = (base_tokens * unit(DOT_DECIMALS) as f64) as u128;
        let quote = (base_tokens * price * unit(USDT_DECIMALS) as f64) as u128;
        Self { base, quote }
    }

    /// Minimum accepted amounts: 99% of each desired amount, floored.
    pub fn minimums(&self) -> (u128, u128) {
        (self.base * 99 / 100, self.quote * 99 / 100)
    }
}

/// Deposits paired liquidity, optionally re-pricing the quote side live.
pub async fn add_liquidity<A: ChainApi>(
    api: &A,
    account: &Account,
    base_asset: AssetId,
    quote_asset: AssetId,
    mut amounts: LiquidityAmounts,
    use_live_price: bool,
) -> Result<H256, ChainError> {
    if use_live_price {
        let live = price::dot_price_usd().await;
        let base_tokens = amounts.base as f64 / unit(DOT_DECIMALS) as f64;
        amounts.quote = (base_tokens * live * unit(USDT_DECIMALS) as f64) as u128;
        info!(price = live, "re-priced quote amount from live feed");
    }

    let (base_min, quote_min) = amounts.minimums();
    info!(
        base = amounts.base,
        quote = amounts.quote,
        base_min,
        quote_min,
        mint_to = %account.address(),
        "adding liquidity"
    );
    let call = calls::add_liquidity(
        base_asset,
        quote_asset,
        amounts.base,
        amounts.quote,
        base_min,
        quote_min,
        account.id(),
    );
    let nonce = api.account_next_index(account.id()).await?;
    let hash = api.submit(&call, account.signer(), nonce, Dispatch::WaitForInclusion).await?;
    info!(%hash, "liquidity added");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::round_amounts(1_000, 2_000, 990, 1_980)]
    #[case::not_divisible_by_100(101, 97, 99, 96)]
    #[case::tiny_amounts(1, 1, 0, 0)]
    #[case::large_units(2_500_000_000, 10_000_000, 2_475_000_000, 9_900_000)]
    fn minimums_are_exactly_99_percent_floored(
        #[case] base: u128,
        #[case] quote: u128,
        #[case] base_min: u128,
        #[case] quote_min: u128,
    ) {
        let amounts = LiquidityAmounts { base, quote };
        assert_eq!(amounts.minimums(), (base_min, quote_min));
    }

    #[test]
    fn base_amount_converts_with_asset_decimals() {
        let amounts = LiquidityAmounts::from_base_amount(2.5, 4.0);
        assert_eq!(amounts.base, 2_500_000_000);
        assert_eq!(amounts.quote, 10_000_000);
    }
}
