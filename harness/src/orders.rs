//! Order request construction: price ladders and stress-test jitter.

use rand::Rng;

use crate::assets::AssetId;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl Side {
    /// Encoding used by the orderbook pallet's `is_bid` flag.
    pub fn is_bid(self) -> bool {
        matches!(self, Self::Bid)
    }
}

/// A single resting-order request, produced once and consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequest {
    /// Book side.
    pub side: Side,
    /// Limit price in smallest quote units.
    pub price: u128,
    /// Quantity in smallest base units.
    pub quantity: u128,
    /// Base asset of the pool.
    pub base_asset: AssetId,
    /// Quote asset of the pool.
    pub quote_asset: AssetId,
}

/// A market order, matched immediately at the best available price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketOrder {
    /// Direction of the sweep.
    pub side: Side,
    /// Quantity in smallest base units.
    pub quantity: u128,
    /// Base asset of the pool.
    pub base_asset: AssetId,
    /// Quote asset of the pool.
    pub quote_asset: AssetId,
}

/// Parameters for a symmetric ladder of limit orders around a base price.
#[derive(Debug, Clone, Copy)]
pub struct Ladder {
    /// Base asset of the pool.
    pub base_asset: AssetId,
    /// Quote asset of the pool.
    pub quote_asset: AssetId,
    /// Price the ladder is centered on, in smallest quote units.
    pub base_price: u128,
    /// Price distance between adjacent ticks.
    pub tick_spacing: u128,
    /// Orders generated on each side of the base price.
    pub tick_count: u32,
    /// Quantity carried by every order.
    pub amount_per_order: u128,
}

impl Ladder {
    /// Ask prices: `base + spacing * (i + 1)`, ascending in `i`.
    pub fn ask_prices(&self) -> impl Iterator<Item = u128> + '_ {
        (0..self.tick_count).map(|i| self.base_price + self.tick_spacing * (i as u128 + 1))
    }

    /// Bid prices: `base - spacing * (i + 1)`, walking down from the base.
    ///
    /// Levels that would cross zero saturate at zero.
    pub fn bid_prices(&self) -> impl Iterator<Item = u128> + '_ {
        (0..self.tick_count)
            .map(|i| self.base_price.saturating_sub(self.tick_spacing * (i as u128 + 1)))
    }

    /// All orders for the ladder: asks first, then bids, each in tick order.
    pub fn orders(&self) -> Vec<OrderRequest> {
        let request = |side, price| OrderRequest {
            side,
            price,
            quantity: self.amount_per_order,
            base_asset: self.base_asset,
            quote_asset: self.quote_asset,
        };
        self.ask_prices()
            .map(|price| request(Side::Ask, price))
            .chain(self.bid_prices().map(|price| request(Side::Bid, price)))
            .collect()
    }

    /// Copy of the ladder re-centered on a jittered base price.
    ///
    /// The offset is uniform within plus or minus one tick spacing so that
    /// concurrent workers do not pile onto identical price levels.
    pub fn jittered(&self) -> Self {
        let spacing = self.tick_spacing as i128;
        let offset = rand::rng().random_range(-spacing..=spacing);
        let base_price = if offset.is_negative() {
            self.base_price.saturating_sub(offset.unsigned_abs())
        } else {
            self.base_price + offset as u128
        };
        Self { base_price, ..*self }
    }
}
