//! Shared test double standing in for a live node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use hob_harness::chain::{ChainApi, Dispatch};
use hob_harness::error::ChainError;
use subxt::tx::DynamicPayload;
use subxt::utils::{AccountId32, H256};
use subxt_signer::sr25519::Keypair;

/// In-memory node stub with scriptable submission failures.
#[derive(Debug, Default)]
pub struct StubNode {
    /// Account index the node reports on query.
    pub chain_nonce: AtomicU64,
    /// Nonces of accepted submissions, in arrival order.
    pub seen_nonces: Mutex<Vec<u64>>,
    /// Zero-based submission indices that fail with a rejection.
    fail_on: Mutex<Vec<usize>>,
    submissions: AtomicU64,
}

impl StubNode {
    /// Stub whose account index query returns `nonce`.
    pub fn with_chain_nonce(nonce: u64) -> Self {
        Self { chain_nonce: AtomicU64::new(nonce), ..Self::default() }
    }

    /// Rejects the `index`-th submission (zero-based) seen by the stub.
    pub fn fail_submission(self, index: usize) -> Self {
        self.fail_on.lock().unwrap().push(index);
        self
    }
}

impl ChainApi for StubNode {
    async fn account_next_index(&self, _account: &AccountId32) -> Result<u64, ChainError> {
        Ok(self.chain_nonce.load(Ordering::SeqCst))
    }

    async fn submit(
        &self,
        _call: &DynamicPayload,
        _signer: &Keypair,
        nonce: u64,
        _mode: Dispatch,
    ) -> Result<H256, ChainError> {
        let index = self.submissions.fetch_add(1, Ordering::SeqCst) as usize;
        if self.fail_on.lock().unwrap().contains(&index) {
            return Err(ChainError::Rejected("injected failure".into()));
        }
        self.seen_nonces.lock().unwrap().push(nonce);
        Ok(H256::zero())
    }
}
