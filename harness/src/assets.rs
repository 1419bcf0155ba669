//! Asset identifiers and dev-chain asset constants.

use subxt::dynamic::Value;

/// Chain asset identifier, encoded as the runtime's `WithId` asset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetId(pub u32);

impl AssetId {
    /// Encodes the asset for use in call arguments.
    pub fn to_value(self) -> Value {
        Value::unnamed_variant("WithId", [Value::u128(self.0 as u128)])
    }
}

/// DOT test asset.
pub const DOT: AssetId = AssetId(1);
/// USDT test asset.
pub const USDT: AssetId = AssetId(2);
/// WARP test asset.
pub const WARP: AssetId = AssetId(3);

/// Decimals of the DOT test asset.
pub const DOT_DECIMALS: u32 = 9;
/// Decimals of the USDT test asset.
pub const USDT_DECIMALS: u32 = 6;
/// Decimals of the WARP test asset.
pub const WARP_DECIMALS: u32 = 12;
/// Decimals of the native balance token on the dev chain.
pub const NATIVE_DECIMALS: u32 = 12;

/// Smallest-unit multiplier for the given decimals.
pub const fn unit(decimals: u32) -> u128 {
    10u128.pow(decimals)
}
