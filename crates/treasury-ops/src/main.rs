//! One-shot administrative operations against the game ledger.
//!
//! Each subcommand is a single parameterized operation: it resolves its
//! signer from configuration, builds one transaction (or one offline
//! authorization), and exits. Failures are fatal — the process reports the
//! error chain and exits nonzero.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddressArgs, AuthorizeGachaArgs, AuthorizeMintArgs, AuthorizeWithdrawalArgs, MintTokenArgs,
    SetAuthorityKeyArgs, WithdrawArgs, WithdrawGachaArgs,
};

#[derive(Parser)]
#[command(
    name = "treasury-ops",
    about = "Administrative and treasury operations for the game ledger",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the configured signer's public key and address.
    Address(AddressArgs),
    /// Sign a mint grant with the authority key (offline).
    AuthorizeMint(AuthorizeMintArgs),
    /// Sign a token withdrawal with the authority key (offline).
    AuthorizeWithdrawal(AuthorizeWithdrawalArgs),
    /// Sign a batch gacha withdrawal with the authority key (offline).
    AuthorizeGacha(AuthorizeGachaArgs),
    /// Submit a token withdrawal carrying an authority signature.
    Withdraw(WithdrawArgs),
    /// Submit a batch gacha withdrawal carrying an authority signature.
    WithdrawGacha(WithdrawGachaArgs),
    /// Mint game tokens from the treasury and transfer them.
    MintToken(MintTokenArgs),
    /// Publish the authority public key to the replay guard.
    SetAuthorityKey(SetAuthorityKeyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Address(args) => args.run().await,
        Command::AuthorizeMint(args) => args.run().await,
        Command::AuthorizeWithdrawal(args) => args.run().await,
        Command::AuthorizeGacha(args) => args.run().await,
        Command::Withdraw(args) => args.run().await,
        Command::WithdrawGacha(args) => args.run().await,
        Command::MintToken(args) => args.run().await,
        Command::SetAuthorityKey(args) => args.run().await,
    }
}
