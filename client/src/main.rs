use anyhow::Context;
use clap::Parser;
use counter_client::{
    args::{get_airdrop_lamports, get_commitment, get_payer, get_solana_cluster, Args, Command},
    driver, CounterClient, RpcTransport,
};
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let cluster_url = get_solana_cluster(args.cluster);
    let commitment = get_commitment(args.commitment)?;
    let payer = get_payer(args.keypair)?;
    let airdrop = get_airdrop_lamports(args.airdrop)?;

    let transport = RpcTransport::new(&cluster_url, commitment);
    info!(payer = %payer.pubkey(), cluster = %transport.url(), "Identity initialized");

    if let Some(lamports) = airdrop {
        transport
            .airdrop(&payer.pubkey(), lamports)
            .await
            .context("Failed to fund payer")?;
    }

    let client = CounterClient::new(transport, payer);
    match args.command {
        Command::Init => {
            let counter = Keypair::new();
            let account = client.initialize(&counter).await?;
            println!("{} {}", account.address, account.count);
        }
        Command::Increment { counter } => {
            client.increment(&counter).await?;
            let account = client.fetch(&counter).await?;
            println!("{} {}", account.address, account.count);
        }
        Command::Fetch { counter } => {
            let account = client.fetch(&counter).await?;
            println!("{} {}", account.address, account.count);
        }
        Command::Run { increments } => {
            driver::run(&client, increments).await?;
        }
    }
    Ok(())
}
