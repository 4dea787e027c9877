use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use solana_sdk::{
    bs58,
    commitment_config::CommitmentConfig,
    native_token::sol_to_lamports,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};

const DEFAULT_CLUSTER: &str = "localnet";
const DEFAULT_COMMITMENT: &str = "confirmed";
const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true, help = "Cluster moniker (localnet, devnet, testnet, mainnet) or RPC URL")]
    pub cluster: Option<String>,
    #[arg(long, global = true, help = "Commitment level: processed, confirmed or finalized")]
    pub commitment: Option<String>,
    #[arg(long, global = true, help = "Path to the payer keypair file")]
    pub keypair: Option<PathBuf>,
    #[arg(long, global = true, help = "Airdrop this many SOL to the payer before running")]
    pub airdrop: Option<f64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new counter under a freshly generated identity.
    Init,
    /// Add one to an existing counter.
    Increment {
        #[arg(long)]
        counter: Pubkey,
    },
    /// Print the current value of a counter.
    Fetch {
        #[arg(long)]
        counter: Pubkey,
    },
    /// Initialize a fresh counter, then increment it, checking the value after every call.
    Run {
        #[arg(long, default_value_t = 2)]
        increments: u64,
    },
}

pub fn get_solana_cluster(cli_cluster: Option<String>) -> String {
    let cluster = std::env::var("COUNTER_CLUSTER")
        .ok()
        .or(cli_cluster)
        .unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
    cluster_url(&cluster)
}

pub fn get_commitment(cli_commitment: Option<String>) -> anyhow::Result<CommitmentConfig> {
    let commitment = std::env::var("COUNTER_COMMITMENT")
        .ok()
        .or(cli_commitment)
        .unwrap_or_else(|| DEFAULT_COMMITMENT.to_string());
    parse_commitment(&commitment)
}

pub fn get_payer(cli_keypair: Option<PathBuf>) -> anyhow::Result<Keypair> {
    if let Ok(private_key) = std::env::var("COUNTER_PRIVATE_KEY") {
        return keypair_from_base58(&private_key);
    }
    let path = cli_keypair.unwrap_or_else(|| expand_home(DEFAULT_KEYPAIR_PATH));
    read_keypair_file(&path)
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("Failed to read keypair file {}", path.display()))
}

/// Lamports to airdrop to the payer, if any. Only positive, finite amounts are accepted.
pub fn get_airdrop_lamports(cli_airdrop: Option<f64>) -> anyhow::Result<Option<u64>> {
    match cli_airdrop {
        None => Ok(None),
        Some(sol) if sol.is_finite() && sol > 0.0 => Ok(Some(sol_to_lamports(sol))),
        Some(sol) => bail!("Airdrop amount must be a positive number of SOL, got {sol}"),
    }
}

fn cluster_url(cluster: &str) -> String {
    match cluster {
        "localnet" | "l" => "http://127.0.0.1:8899",
        "devnet" | "d" => "https://api.devnet.solana.com",
        "testnet" | "t" => "https://api.testnet.solana.com",
        "mainnet" | "mainnet-beta" | "m" => "https://api.mainnet-beta.solana.com",
        url => url,
    }
    .to_string()
}

fn parse_commitment(commitment: &str) -> anyhow::Result<CommitmentConfig> {
    Ok(match commitment {
        "processed" => CommitmentConfig::processed(),
        "confirmed" => CommitmentConfig::confirmed(),
        "finalized" => CommitmentConfig::finalized(),
        other => bail!("Unknown commitment level: {other}"),
    })
}

fn keypair_from_base58(private_key: &str) -> anyhow::Result<Keypair> {
    let bytes = bs58::decode(private_key.trim())
        .into_vec()
        .context("COUNTER_PRIVATE_KEY is not valid base58")?;
    Keypair::try_from(bytes.as_slice())
        .map_err(|err| anyhow!("{err}"))
        .context("COUNTER_PRIVATE_KEY is not a valid keypair")
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
