//! Spot price lookup with a fixed fallback.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Simple-price endpoint for the DOT/USD pair.
const PRICE_ENDPOINT: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=polkadot&vs_currencies=usd";

/// Price substituted whenever the live lookup fails.
pub const FALLBACK_PRICE_USD: f64 = 4.0;

/// Failures while fetching the spot price.
#[derive(Debug, Error)]
pub enum PriceFeedError {
    /// Transport or HTTP-level failure.
    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response did not carry the expected pair.
    #[error("price missing from response")]
    MissingPrice,
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    polkadot: Option<PairPrice>,
}

#[derive(Debug, Deserialize)]
struct PairPrice {
    usd: Option<f64>,
}

/// Fetches the current DOT price in USD.
pub async fn fetch_dot_price() -> Result<f64, PriceFeedError> {
    let response = reqwest::get(PRICE_ENDPOINT).await?.error_for_status()?;
    let body: SimplePrice = response.json().await?;
    body.polkadot.and_then(|pair| pair.usd).ok_or(PriceFeedError::MissingPrice)
}

/// Resolves a fetched price, substituting the fallback on any error.
pub fn price_or_fallback(fetched: Result<f64, PriceFeedError>) -> f64 {
    match fetched {
        Ok(price) => price,
        Err(e) => {
            warn!(error = %e, fallback = FALLBACK_PRICE_USD, "price lookup failed, using fallback");
            FALLBACK_PRICE_USD
        }
    }
}

/// Current DOT price in USD, falling back to [`FALLBACK_PRICE_USD`].
pub async fn dot_price_usd() -> f64 {
    price_or_fallback(fetch_dot_price().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_substitutes_on_any_error() {
        assert_eq!(price_or_fallback(Err(PriceFeedError::MissingPrice)), FALLBACK_PRICE_USD);
    }

    #[test]
    fn live_price_passes_through() {
        assert_eq!(price_or_fallback(Ok(6.25)), 6.25);
    }
}
