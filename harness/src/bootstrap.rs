//! One-shot provisioning of test assets and balances on a fresh dev chain.

use std::sync::Arc;
use std::time::Duration;

use subxt::tx::DynamicPayload;
use tokio::time::sleep;
use tracing::info;

use crate::accounts::Account;
use crate::assets::{
    unit, DOT, DOT_DECIMALS, NATIVE_DECIMALS, USDT, USDT_DECIMALS, WARP, WARP_DECIMALS,
};
use crate::calls;
use crate::chain::{ChainApi, Dispatch};
use crate::error::ChainError;
use crate::nonce::NonceAllocator;

/// Mnemonic for the auxiliary funded test account.
const AUX_ACCOUNT_PHRASE: &str =
    "legend dad title ten sentence wealth script body grocery vivid vessel amazing";

/// Pause between provisioning steps so the node keeps up.
const STEP_PACING: Duration = Duration::from_secs(2);

/// Native tokens granted to the provided test account.
const FUNDING_TOKENS: u128 = 10_000;

/// Whole tokens minted per asset per holder.
const MINT_TOKENS: u128 = 100_000_000;

/// Provisions the dev chain end to end.
///
/// Funds the test account from the sudo account, registers the DOT and USDT
/// assets with metadata, mints balances to the sudo, taker, and auxiliary
/// accounts, then does the same for the WARP asset. Steps run sequentially
/// and block on inclusion; any failure aborts the remainder.
pub async fn run<A: ChainApi>(
    api: &Arc<A>,
    sudo: &Account,
    test_account: &Account,
) -> Result<(), ChainError> {
    let taker = Account::bob();
    let aux = Account::from_uri(AUX_ACCOUNT_PHRASE)?;
    let holders = [sudo, &taker, &aux];
    let allocator = NonceAllocator::init(Arc::clone(api), sudo.id().clone()).await?;

    info!(dest = %test_account.address(), tokens = FUNDING_TOKENS, "funding test account");
    let funding = calls::transfer_keep_alive(
        test_account.id(),
        FUNDING_TOKENS * unit(NATIVE_DECIMALS),
    );
    submit_step(api.as_ref(), &allocator, sudo, funding).await?;

    info!("registering assets");
    submit_step(api.as_ref(), &allocator, sudo, calls::asset_create(DOT.0, sudo.id(), 1)).await?;
    submit_step(api.as_ref(), &allocator, sudo, calls::asset_create(USDT.0, sudo.id(), 1)).await?;

    info!("setting asset metadata");
    let dot_metadata = calls::asset_set_metadata(DOT.0, "Polkadot", "DOT", DOT_DECIMALS as u8);
    submit_step(api.as_ref(), &allocator, sudo, dot_metadata).await?;
    let usdt_metadata = calls::asset_set_metadata(USDT.0, "Tether USD", "USDT", USDT_DECIMALS as u8);
    submit_step(api.as_ref(), &allocator, sudo, usdt_metadata).await?;

    info!("minting balances");
    for holder in holders {
        let mint_dot = calls::asset_mint(DOT.0, holder.id(), MINT_TOKENS * unit(DOT_DECIMALS));
        submit_step(api.as_ref(), &allocator, sudo, mint_dot).await?;
        let mint_usdt = calls::asset_mint(USDT.0, holder.id(), MINT_TOKENS * unit(USDT_DECIMALS));
        submit_step(api.as_ref(), &allocator, sudo, mint_usdt).await?;
    }

    info!("registering WARP asset");
    submit_step(api.as_ref(), &allocator, sudo, calls::asset_create(WARP.0, sudo.id(), 1)).await?;
    let warp_metadata = calls::asset_set_metadata(WARP.0, "Warp Token", "WARP", WARP_DECIMALS as u8);
    submit_step(api.as_ref(), &allocator, sudo, warp_metadata).await?;
    for holder in holders {
        let mint_warp = calls::asset_mint(WARP.0, holder.id(), MINT_TOKENS * unit(WARP_DECIMALS));
        submit_step(api.as_ref(), &allocator, sudo, mint_warp).await?;
    }

    info!("bootstrap complete");
    Ok(())
}

async fn submit_step<A: ChainApi>(
    api: &A,
    allocator: &NonceAllocator<A>,
    signer: &Account,
    call: DynamicPayload,
) -> Result<(), ChainError> {
    let nonce = allocator.next().await;
    let hash = api.submit(&call, signer.signer(), nonce, Dispatch::WaitForInclusion).await?;
    info!(%hash, "step included");
    sleep(STEP_PACING).await;
    Ok(())
}
