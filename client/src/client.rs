use anchor_lang::AccountDeserialize;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::{
    blockhash::BlockhashTracker,
    error::CounterClientError,
    instructions,
    transport::{CounterTransport, SendError},
};

/// Client-side view of an on-chain counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAccount {
    pub address: Pubkey,
    pub count: u64,
}

/// Issues counter calls one at a time, each awaiting confirmation before
/// returning. Failures are surfaced as-is; nothing is retried.
pub struct CounterClient<T> {
    transport: T,
    payer: Keypair,
    blockhash: BlockhashTracker,
}

impl<T: CounterTransport> CounterClient<T> {
    pub fn new(transport: T, payer: Keypair) -> Self {
        Self {
            transport,
            payer,
            blockhash: BlockhashTracker::default(),
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create the counter addressed by `counter` and return it at zero.
    pub async fn initialize(&self, counter: &Keypair) -> Result<CounterAccount, CounterClientError> {
        let address = counter.pubkey();
        let ix = instructions::initialize(&address, &self.payer.pubkey());
        let signature = self.send(address, &[ix], &[counter]).await?;
        info!(counter = %address, %signature, "Counter initialized");

        self.fetch(&address).await
    }

    /// Add one to the counter at `counter`.
    pub async fn increment(&self, counter: &Pubkey) -> Result<(), CounterClientError> {
        let ix = instructions::increment(counter);
        let signature = self.send(*counter, &[ix], &[]).await?;
        info!(counter = %counter, %signature, "Counter incremented");
        Ok(())
    }

    pub async fn fetch(&self, counter: &Pubkey) -> Result<CounterAccount, CounterClientError> {
        let account = self
            .transport
            .get_account(counter)
            .await?
            .ok_or(CounterClientError::AccountNotFound { address: *counter })?;

        if account.owner != counter::ID {
            return Err(CounterClientError::InvalidAccountData {
                address: *counter,
                reason: format!("owned by {}", account.owner),
            });
        }

        let state = counter::Counter::try_deserialize(&mut account.data.as_slice()).map_err(
            |err| CounterClientError::InvalidAccountData {
                address: *counter,
                reason: err.to_string(),
            },
        )?;
        debug!(counter = %counter, count = state.count, "Counter fetched");

        Ok(CounterAccount {
            address: *counter,
            count: state.count,
        })
    }

    async fn send(
        &self,
        target: Pubkey,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature, CounterClientError> {
        let blockhash = self.blockhash.next(&self.transport).await?;
        let signers: Vec<&Keypair> = std::iter::once(&self.payer)
            .chain(extra_signers.iter().copied())
            .collect();
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            signers.as_slice(),
            blockhash,
        );

        self.transport
            .send_and_confirm(&tx)
            .await
            .map_err(|err| match err {
                SendError::Rejected(rejected) => {
                    CounterClientError::from_transaction_error(target, rejected)
                }
                SendError::Unconfirmed(reason) => CounterClientError::Confirmation { reason },
            })
    }
}
