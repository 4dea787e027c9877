use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tracing::{debug, info};

use crate::error::CounterClientError;

const AIRDROP_POLL_INTERVAL: Duration = Duration::from_millis(500);
const AIRDROP_MAX_POLLS: u8 = 20;

/// Why a submitted transaction did not land.
#[derive(Debug)]
pub enum SendError {
    /// The runtime executed and rejected the transaction.
    Rejected(TransactionError),
    /// The transaction could not be submitted or its outcome observed.
    Unconfirmed(String),
}

/// The external execution environment the counter client talks to.
#[async_trait]
pub trait CounterTransport: Send + Sync {
    /// A recent blockhash different from `previous`.
    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash, CounterClientError>;

    /// Submit `transaction` and wait until it is confirmed.
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, SendError>;

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, CounterClientError>;
}

/// Talks to a cluster over JSON-RPC.
pub struct RpcTransport {
    client: RpcClient,
}

impl RpcTransport {
    pub fn new(url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.to_string(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Fund `address` with `lamports` and wait for the airdrop to confirm.
    pub async fn airdrop(&self, address: &Pubkey, lamports: u64) -> Result<(), CounterClientError> {
        let signature = self
            .client
            .request_airdrop(address, lamports)
            .await
            .map_err(CounterClientError::confirmation)?;
        info!(%address, lamports, %signature, "Airdrop requested");

        for _ in 0..AIRDROP_MAX_POLLS {
            let confirmed = self
                .client
                .confirm_transaction(&signature)
                .await
                .map_err(CounterClientError::confirmation)?;
            if confirmed {
                return Ok(());
            }
            tokio::time::sleep(AIRDROP_POLL_INTERVAL).await;
        }
        Err(CounterClientError::confirmation(format!(
            "airdrop {signature} did not land"
        )))
    }
}

#[async_trait]
impl CounterTransport for RpcTransport {
    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash, CounterClientError> {
        let blockhash = if *previous == Hash::default() {
            self.client.get_latest_blockhash().await
        } else {
            self.client.get_new_latest_blockhash(previous).await
        };
        blockhash.map_err(CounterClientError::confirmation)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, SendError> {
        match self.client.send_and_confirm_transaction(transaction).await {
            Ok(signature) => {
                debug!(%signature, "Transaction confirmed");
                Ok(signature)
            }
            Err(err) => match err.get_transaction_error() {
                Some(rejected) => Err(SendError::Rejected(rejected)),
                None => Err(SendError::Unconfirmed(err.to_string())),
            },
        }
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, CounterClientError> {
        self.client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map(|response| response.value)
            .map_err(CounterClientError::confirmation)
    }
}
