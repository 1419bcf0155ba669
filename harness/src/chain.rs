//! Connection to the node and signed extrinsic submission.

use std::future::Future;

use subxt::backend::legacy::LegacyRpcMethods;
use subxt::backend::rpc::RpcClient;
use subxt::config::DefaultExtrinsicParamsBuilder;
use subxt::tx::DynamicPayload;
use subxt::utils::{AccountId32, H256};
use subxt::{OnlineClient, SubstrateConfig};
use subxt_signer::sr25519::Keypair;
use tracing::{debug, info};

use crate::error::ChainError;

/// How long to wait for a submitted extrinsic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Fire-and-forget: return as soon as the pool accepts the extrinsic.
    Submit,
    /// Block until the extrinsic lands in a finalized block and succeeds.
    WaitForInclusion,
}

/// Node operations the harness depends on.
///
/// Implemented by [`ChainClient`] against a live node; tests substitute a
/// stub where no node is available.
pub trait ChainApi: Send + Sync {
    /// Next free transaction index for the account, as the node reports it.
    fn account_next_index(
        &self,
        account: &AccountId32,
    ) -> impl Future<Output = Result<u64, ChainError>> + Send;

    /// Signs `call` with `signer` at `nonce` and dispatches it.
    fn submit(
        &self,
        call: &DynamicPayload,
        signer: &Keypair,
        nonce: u64,
        mode: Dispatch,
    ) -> impl Future<Output = Result<H256, ChainError>> + Send;
}

/// RPC connection to the chain node.
pub struct ChainClient {
    client: OnlineClient<SubstrateConfig>,
    rpc: LegacyRpcMethods<SubstrateConfig>,
}

impl ChainClient {
    /// Connects to the node at `url`.
    pub async fn connect(url: &str) -> Result<Self, ChainError> {
        let rpc_client = RpcClient::from_url(url)
            .await
            .map_err(|e| ChainError::Connectivity(format!("connect to {url}: {e}")))?;
        let client = OnlineClient::<SubstrateConfig>::from_rpc_client(rpc_client.clone())
            .await
            .map_err(ChainError::from)?;
        let rpc = LegacyRpcMethods::new(rpc_client);
        info!(url, "connected to node");
        Ok(Self { client, rpc })
    }

    /// Finalized chain head hash and number.
    pub async fn chain_head(&self) -> Result<(H256, u64), ChainError> {
        let hash = self.rpc.chain_get_finalized_head().await.map_err(ChainError::from)?;
        let header = self
            .rpc
            .chain_get_header(Some(hash))
            .await
            .map_err(ChainError::from)?
            .ok_or_else(|| ChainError::Rejected("head header missing".into()))?;
        Ok((hash, header.number as u64))
    }

    /// Logs the chain head and up to `depth` blocks behind it.
    pub async fn health_check(&self, depth: u32) -> Result<(), ChainError> {
        let (head, number) = self.chain_head().await?;
        info!(%head, number, "chain head");
        let mut hash = head;
        for _ in 0..depth {
            let header = match self.rpc.chain_get_header(Some(hash)).await.map_err(ChainError::from)? {
                Some(header) => header,
                None => break,
            };
            info!(block = header.number, %hash, "block");
            if header.number == 0 {
                break;
            }
            hash = header.parent_hash;
        }
        Ok(())
    }
}

impl ChainApi for ChainClient {
    async fn account_next_index(&self, account: &AccountId32) -> Result<u64, ChainError> {
        self.rpc.system_account_next_index(account).await.map_err(ChainError::from)
    }

    async fn submit(
        &self,
        call: &DynamicPayload,
        signer: &Keypair,
        nonce: u64,
        mode: Dispatch,
    ) -> Result<H256, ChainError> {
        let params = DefaultExtrinsicParamsBuilder::<SubstrateConfig>::new().nonce(nonce).build();
        let extrinsic = self
            .client
            .tx()
            .create_signed_offline(call, signer, params)
            .map_err(ChainError::from)?;
        match mode {
            Dispatch::Submit => {
                let hash = extrinsic.submit().await.map_err(ChainError::from)?;
                debug!(%hash, nonce, "extrinsic submitted");
                Ok(hash)
            }
            Dispatch::WaitForInclusion => {
                let progress = extrinsic.submit_and_watch().await.map_err(ChainError::from)?;
                let in_block = progress.wait_for_finalized().await.map_err(ChainError::from)?;
                let hash = in_block.extrinsic_hash();
                in_block.wait_for_success().await.map_err(ChainError::from)?;
                debug!(%hash, nonce, "extrinsic finalized");
                Ok(hash)
            }
        }
    }
}
