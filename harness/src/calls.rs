//! Dynamic call payloads for the orderbook, assets, and balances pallets.

use subxt::dynamic::{self, Value};
use subxt::tx::DynamicPayload;
use subxt::ext::scale_value::Composite;
use subxt::utils::AccountId32;

use crate::assets::AssetId;
use crate::orders::{MarketOrder, OrderRequest};

/// Pallet hosting the order book extrinsics.
pub const ORDERBOOK_PALLET: &str = "HybridOrderbook";

fn named(fields: Vec<(&str, Value)>) -> Composite<()> {
    Composite::Named(fields.into_iter().map(|(name, value)| (name.to_string(), value)).collect())
}

fn account(id: &AccountId32) -> Value {
    Value::from_bytes(id.0)
}

/// `MultiAddress::Id` lookup for pallets that take an address.
fn address(id: &AccountId32) -> Value {
    Value::unnamed_variant("Id", [account(id)])
}

/// `limit_order` call for a single resting order.
pub fn limit_order(req: &OrderRequest) -> DynamicPayload {
    dynamic::tx(
        ORDERBOOK_PALLET,
        "limit_order",
        named(vec![
            ("base_asset", req.base_asset.to_value()),
            ("quote_asset", req.quote_asset.to_value()),
            ("is_bid", Value::bool(req.side.is_bid())),
            ("price", Value::u128(req.price)),
            ("quantity", Value::u128(req.quantity)),
        ]),
    )
}

/// `market_order` call matched immediately at the best price.
pub fn market_order(req: &MarketOrder) -> DynamicPayload {
    dynamic::tx(
        ORDERBOOK_PALLET,
        "market_order",
        named(vec![
            ("base_asset", req.base_asset.to_value()),
            ("quote_asset", req.quote_asset.to_value()),
            ("quantity", Value::u128(req.quantity)),
            ("is_bid", Value::bool(req.side.is_bid())),
        ]),
    )
}

/// Pool registration parameters.
#[derive(Debug, Clone, Copy)]
pub struct PoolParams {
    /// Base asset of the pool.
    pub base_asset: AssetId,
    /// Base asset decimals.
    pub base_decimals: u8,
    /// Quote asset of the pool.
    pub quote_asset: AssetId,
    /// Quote asset decimals.
    pub quote_decimals: u8,
    /// Taker fee as a percentage (0.03 means 0.03%).
    pub taker_fee_rate: f64,
    /// Minimum price movement.
    pub tick_size: u128,
    /// Minimum trading amount.
    pub lot_size: u128,
    /// Pool token decimals.
    pub pool_decimals: u8,
}

impl PoolParams {
    /// Taker fee converted to parts-per-million, as the pallet expects.
    pub fn taker_fee_permill(&self) -> u32 {
        (self.taker_fee_rate * 10_000.0) as u32
    }
}

/// `create_pool` call registering a trading venue.
pub fn create_pool(params: &PoolParams) -> DynamicPayload {
    dynamic::tx(
        ORDERBOOK_PALLET,
        "create_pool",
        named(vec![
            ("base_asset", params.base_asset.to_value()),
            ("base_decimals", Value::u128(params.base_decimals as u128)),
            ("quote_asset", params.quote_asset.to_value()),
            ("quote_decimals", Value::u128(params.quote_decimals as u128)),
            ("taker_fee_rate", Value::u128(params.taker_fee_permill() as u128)),
            ("tick_size", Value::u128(params.tick_size)),
            ("lot_size", Value::u128(params.lot_size)),
            ("pool_decimals", Value::u128(params.pool_decimals as u128)),
        ]),
    )
}

/// `add_liquidity` call depositing paired assets into a pool.
#[allow(clippy::too_many_arguments)]
pub fn add_liquidity(
    base_asset: AssetId,
    quote_asset: AssetId,
    base_desired: u128,
    quote_desired: u128,
    base_min: u128,
    quote_min: u128,
    mint_to: &AccountId32,
) -> DynamicPayload {
    dynamic::tx(
        ORDERBOOK_PALLET,
        "add_liquidity",
        named(vec![
            ("base_asset", base_asset.to_value()),
            ("quote_asset", quote_asset.to_value()),
            ("base_asset_desired", Value::u128(base_desired)),
            ("quote_asset_desired", Value::u128(quote_desired)),
            ("base_asset_min", Value::u128(base_min)),
            ("quote_asset_min", Value::u128(quote_min)),
            ("mint_to", account(mint_to)),
        ]),
    )
}

/// `Balances::transfer_keep_alive` to fund an account.
pub fn transfer_keep_alive(dest: &AccountId32, value: u128) -> DynamicPayload {
    dynamic::tx(
        "Balances",
        "transfer_keep_alive",
        named(vec![("dest", address(dest)), ("value", Value::u128(value))]),
    )
}

/// `Assets::create` registering a new asset class.
pub fn asset_create(id: u32, admin: &AccountId32, min_balance: u128) -> DynamicPayload {
    dynamic::tx(
        "Assets",
        "create",
        named(vec![
            ("id", Value::u128(id as u128)),
            ("admin", address(admin)),
            ("min_balance", Value::u128(min_balance)),
        ]),
    )
}

/// `Assets::set_metadata` naming an asset.
pub fn asset_set_metadata(id: u32, name: &str, symbol: &str, decimals: u8) -> DynamicPayload {
    dynamic::tx(
        "Assets",
        "set_metadata",
        named(vec![
            ("id", Value::u128(id as u128)),
            ("name", Value::from_bytes(name.as_bytes())),
            ("symbol", Value::from_bytes(symbol.as_bytes())),
            ("decimals", Value::u128(decimals as u128)),
        ]),
    )
}

/// `Assets::mint` issuing balance to a holder.
pub fn asset_mint(id: u32, beneficiary: &AccountId32, amount: u128) -> DynamicPayload {
    dynamic::tx(
        "Assets",
        "mint",
        named(vec![
            ("id", Value::u128(id as u128)),
            ("beneficiary", address(beneficiary)),
            ("amount", Value::u128(amount)),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taker_fee_converts_to_permill() {
        // 0.03% of trades -> 300 parts per million.
        let params = PoolParams {
            base_asset: AssetId(1),
            base_decimals: 9,
            quote_asset: AssetId(2),
            quote_decimals: 6,
            taker_fee_rate: 0.03,
            tick_size: 1,
            lot_size: 1,
            pool_decimals: 9,
        };
        assert_eq!(params.taker_fee_permill(), 300);
    }
}
