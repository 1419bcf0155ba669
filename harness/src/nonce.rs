//! Per-account nonce allocation shared by concurrent workers.

use std::sync::Arc;

use subxt::utils::AccountId32;
use tokio::sync::Mutex;
use tracing::debug;

use crate::chain::ChainApi;
use crate::error::ChainError;

/// Hands out strictly increasing transaction indices for one account.
///
/// A single mutex guards the read-then-increment, so the same value is never
/// issued twice while the allocator lives. Each account gets its own
/// allocator instance; two accounts never share a lock.
pub struct NonceAllocator<A> {
    api: Arc<A>,
    account: AccountId32,
    next: Mutex<u64>,
}

impl<A: ChainApi> NonceAllocator<A> {
    /// Creates an allocator primed from the node's reported account index.
    pub async fn init(api: Arc<A>, account: AccountId32) -> Result<Self, ChainError> {
        let start = api.account_next_index(&account).await?;
        debug!(%account, start, "nonce allocator initialized");
        Ok(Self { api, account, next: Mutex::new(start) })
    }

    /// Issues the next unused nonce.
    pub async fn next(&self) -> u64 {
        let mut next = self.next.lock().await;
        let nonce = *next;
        *next += 1;
        nonce
    }

    /// Overwrites the local counter with the node's authoritative value.
    ///
    /// Called after a submission failure that may mean the local counter and
    /// the chain's accepted sequence have drifted apart. Any locally buffered
    /// increments are discarded; issuance stays blocked until the fresh value
    /// is in place.
    pub async fn resync(&self) -> Result<u64, ChainError> {
        let mut next = self.next.lock().await;
        let fresh = self.api.account_next_index(&self.account).await?;
        debug!(account = %self.account, fresh, "nonce allocator resynced");
        *next = fresh;
        Ok(fresh)
    }

    /// Account this allocator issues nonces for.
    pub fn account(&self) -> &AccountId32 {
        &self.account
    }
}
