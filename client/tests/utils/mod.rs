#![allow(dead_code)]

use anchor_lang::{
    solana_program::{account_info::AccountInfo, entrypoint::ProgramResult},
    system_program, AccountSerialize,
};
use async_trait::async_trait;
use counter_client::{CounterClient, CounterClientError, CounterTransport, SendError};
use solana_program_test::{
    processor, BanksClient, BanksClientError, ProgramTest, ProgramTestBanksClientExt,
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    rent::Rent,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tokio::sync::Mutex;

/// Runs the counter program in-process, behind the same transport seam the
/// RPC client uses.
pub struct BanksTransport {
    banks_client: Mutex<BanksClient>,
}

impl BanksTransport {
    pub fn new(banks_client: BanksClient) -> Self {
        Self {
            banks_client: Mutex::new(banks_client),
        }
    }
}

#[async_trait]
impl CounterTransport for BanksTransport {
    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash, CounterClientError> {
        self.banks_client
            .lock()
            .await
            .get_new_latest_blockhash(previous)
            .await
            .map_err(CounterClientError::confirmation)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, SendError> {
        let result = self
            .banks_client
            .lock()
            .await
            .process_transaction(transaction.clone())
            .await;
        match result {
            Ok(()) => Ok(transaction.signatures[0]),
            Err(BanksClientError::TransactionError(err))
            | Err(BanksClientError::SimulationError { err, .. }) => Err(SendError::Rejected(err)),
            Err(other) => Err(SendError::Unconfirmed(other.to_string())),
        }
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, CounterClientError> {
        self.banks_client
            .lock()
            .await
            .get_account(*address)
            .await
            .map_err(CounterClientError::confirmation)
    }
}

fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    // Anchor's entry wants the slice and the infos to share one lifetime.
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    counter::entry(program_id, accounts, data)
}

pub fn program_test() -> ProgramTest {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut program_test = ProgramTest::default();
    program_test.prefer_bpf(false);
    program_test.add_program("counter", counter::ID, processor!(process_instruction));
    program_test
}

/// Fund a fresh system account so it can pay for transactions.
pub fn add_funded_payer(program_test: &mut ProgramTest) -> Keypair {
    let payer = Keypair::new();
    program_test.add_account(
        payer.pubkey(),
        Account::new(LAMPORTS_PER_SOL, 0, &system_program::ID),
    );
    payer
}

/// Place a counter holding `count` at `address` before the bank starts.
pub fn add_counter(program_test: &mut ProgramTest, address: Pubkey, count: u64) {
    let mut data = Vec::with_capacity(counter::Counter::SPACE);
    counter::Counter { count }
        .try_serialize(&mut data)
        .expect("counter must serialize");
    program_test.add_account(
        address,
        Account {
            lamports: Rent::default().minimum_balance(data.len()),
            data,
            owner: counter::ID,
            executable: false,
            rent_epoch: 0,
        },
    );
}

pub async fn start(program_test: ProgramTest) -> CounterClient<BanksTransport> {
    let (banks_client, payer, _recent_blockhash) = program_test.start().await;
    CounterClient::new(BanksTransport::new(banks_client), payer)
}

pub async fn start_default() -> CounterClient<BanksTransport> {
    start(program_test()).await
}

/// Start the bank and return a client for the default payer and one for `other`.
pub async fn start_pair(
    program_test: ProgramTest,
    other: Keypair,
) -> (CounterClient<BanksTransport>, CounterClient<BanksTransport>) {
    let (banks_client, payer, _recent_blockhash) = program_test.start().await;
    let other_client = CounterClient::new(BanksTransport::new(banks_client.clone()), other);
    (
        CounterClient::new(BanksTransport::new(banks_client), payer),
        other_client,
    )
}
