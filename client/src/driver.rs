use anyhow::{bail, Context};
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;

use crate::{client::CounterAccount, transport::CounterTransport, CounterClient};

/// Drive a fresh counter through initialize and `increments` increments,
/// checking the stored value after every confirmed call. Stops at the first
/// failed call or unexpected value.
pub async fn run<T: CounterTransport>(
    client: &CounterClient<T>,
    increments: u64,
) -> anyhow::Result<CounterAccount> {
    let counter = Keypair::new();
    let address = counter.pubkey();

    let mut account = client
        .initialize(&counter)
        .await
        .context("initialize failed")?;
    check_count(&account, 0)?;
    println!("initialize: count = {}", account.count);

    for expected in 1..=increments {
        client
            .increment(&address)
            .await
            .with_context(|| format!("increment #{expected} failed"))?;
        account = client.fetch(&address).await?;
        check_count(&account, expected)?;
        println!("increment: count = {}", account.count);
    }

    info!(counter = %address, increments, "Counter run finished");
    Ok(account)
}

fn check_count(account: &CounterAccount, expected: u64) -> anyhow::Result<()> {
    if account.count != expected {
        bail!(
            "Expected count {expected} for {}, found {}",
            account.address,
            account.count
        );
    }
    Ok(())
}
