//! The operations themselves: one struct of flags and one `run` per
//! subcommand. Each is a single linear sequence — resolve inputs, build
//! one call, sign, submit — with no retries and no shared state between
//! invocations.

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use authz_codec::{GachaWithdrawal, MintGrant, TokenWithdrawal};
use chain_core::address::well_known;
use chain_core::transaction::pure;
use chain_core::{Address, MoveCall, Signer, TransactionData};
use rpc_client::LedgerRpc;

use crate::config::{decode_hex_arg, GasOpts, NetworkOpts, SignerOpts};

/// Move module hosting the token treasury entry points.
const TREASURY_MODULE: &str = "treasury";
/// Move module hosting the gacha entry points.
const GAME_MODULE: &str = "game";

// ─── address ─────────────────────────────────────────────────────────

/// Print the configured signer's public key and address.
#[derive(Args)]
pub struct AddressArgs {
    #[command(flatten)]
    signer: SignerOpts,
}

impl AddressArgs {
    pub async fn run(self) -> Result<()> {
        let signer = self.signer.build_signer().await?;
        let public_key = signer.public_key().await?;

        println!("scheme:     {}", signer.scheme());
        println!("public key: {}", public_key.to_hex());
        println!("address:    {}", public_key.to_address());
        Ok(())
    }
}

// ─── authorize-* (offline) ───────────────────────────────────────────

/// Sign a mint grant with the authority key.
#[derive(Args)]
pub struct AuthorizeMintArgs {
    #[command(flatten)]
    signer: SignerOpts,

    /// Player receiving the mint.
    #[arg(long)]
    recipient: Address,

    #[arg(long)]
    amount: u64,

    /// Unix seconds; 0 means no expiry.
    #[arg(long, default_value_t = 0)]
    expire_at: u64,

    #[arg(long)]
    salt: u64,
}

impl AuthorizeMintArgs {
    pub async fn run(self) -> Result<()> {
        let message = MintGrant {
            recipient: self.recipient,
            amount: self.amount,
            expire_at: self.expire_at,
            salt: self.salt,
        }
        .encode();

        let signer = self.signer.build_signer().await?;
        print_authorization("mint grant", &*signer, &message).await
    }
}

/// Sign a scalar token withdrawal with the authority key.
#[derive(Args)]
pub struct AuthorizeWithdrawalArgs {
    #[command(flatten)]
    signer: SignerOpts,

    /// Deployed game package id.
    #[arg(long, env = "GAME_PACKAGE")]
    package: Address,

    /// Player withdrawing.
    #[arg(long)]
    recipient: Address,

    #[arg(long)]
    amount: u64,

    #[arg(long)]
    expire_at: u64,

    #[arg(long)]
    salt: u64,

    #[arg(long, default_value_t = 0)]
    fee: u64,

    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,
}

impl AuthorizeWithdrawalArgs {
    pub async fn run(self) -> Result<()> {
        let message = TokenWithdrawal {
            recipient: self.recipient,
            amount: self.amount,
            expire_at: self.expire_at,
            salt: self.salt,
            fee: self.fee,
            chain_id: self.chain_id,
            package: self.package,
        }
        .encode();

        let signer = self.signer.build_signer().await?;
        print_authorization("token withdrawal", &*signer, &message).await
    }
}

/// Sign a batch gacha withdrawal with the authority key.
#[derive(Args)]
pub struct AuthorizeGachaArgs {
    #[command(flatten)]
    signer: SignerOpts,

    #[arg(long, env = "GAME_PACKAGE")]
    package: Address,

    #[arg(long)]
    recipient: Address,

    /// Comma-separated gacha token types.
    #[arg(long, value_delimiter = ',', required = true)]
    token_types: Vec<u64>,

    /// Comma-separated amounts, parallel to --token-types.
    #[arg(long, value_delimiter = ',', required = true)]
    amounts: Vec<u64>,

    #[arg(long)]
    expire_at: u64,

    #[arg(long)]
    salt: u64,

    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,
}

impl AuthorizeGachaArgs {
    pub async fn run(self) -> Result<()> {
        if self.token_types.len() != self.amounts.len() {
            bail!(
                "--token-types and --amounts must be parallel: got {} and {}",
                self.token_types.len(),
                self.amounts.len()
            );
        }

        let message = GachaWithdrawal {
            recipient: self.recipient,
            token_types: self.token_types,
            amounts: self.amounts,
            expire_at: self.expire_at,
            salt: self.salt,
            chain_id: self.chain_id,
            package: self.package,
        }
        .encode();

        let signer = self.signer.build_signer().await?;
        print_authorization("gacha withdrawal", &*signer, &message).await
    }
}

async fn print_authorization(
    label: &str,
    signer: &dyn Signer,
    message: &[u8],
) -> Result<()> {
    let envelope = signer.sign_data(message).await?;
    info!(scheme = %envelope.scheme(), "signed {label} message");

    println!("message:          0x{}", hex::encode(message));
    println!("signature:        0x{}", hex::encode(envelope.signature()));
    println!("envelope:         0x{}", hex::encode(envelope.to_bytes()));
    println!("envelope base64:  {}", envelope.to_base64());
    Ok(())
}

// ─── withdraw ────────────────────────────────────────────────────────

/// Submit a token withdrawal carrying an authority-signed message.
#[derive(Args)]
pub struct WithdrawArgs {
    #[command(flatten)]
    signer: SignerOpts,

    #[command(flatten)]
    network: NetworkOpts,

    #[command(flatten)]
    gas: GasOpts,

    /// Shared treasury counter object.
    #[arg(long, env = "TREASURY_COUNTER")]
    counter: Address,

    /// Shared seen-messages (replay guard) object.
    #[arg(long, env = "SEEN_MESSAGES")]
    seen_messages: Address,

    #[arg(long)]
    amount: u64,

    #[arg(long)]
    expire_at: u64,

    #[arg(long)]
    salt: u64,

    #[arg(long, default_value_t = 0)]
    fee: u64,

    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// Authority signature over the withdrawal message, 0x-hex.
    #[arg(long)]
    signed_message: String,
}

impl WithdrawArgs {
    pub async fn run(self) -> Result<()> {
        let signed_message = decode_hex_arg("signed-message", &self.signed_message)?;
        let signer = self.signer.build_signer().await?;
        let rpc = self.network.rpc();

        let counter = rpc.object_ref(&self.counter).await?;
        let seen = rpc.object_ref(&self.seen_messages).await?;
        let clock = rpc.object_ref(&well_known::clock()).await?;

        let call = MoveCall::new(self.network.package, TREASURY_MODULE, "withdraw")
            .object(counter)
            .pure(pure::u64(self.amount))
            .pure(pure::u64(self.expire_at))
            .pure(pure::u64(self.salt))
            .pure(pure::u64(self.fee))
            .pure(pure::u64(self.chain_id))
            .pure(pure::address(&self.network.package))
            .pure(pure::bytes(&signed_message))
            .object(seen)
            .object(clock);

        submit_call(&*signer, &rpc, call, &self.gas).await
    }
}

/// Submit a batch gacha withdrawal carrying an authority-signed message.
#[derive(Args)]
pub struct WithdrawGachaArgs {
    #[command(flatten)]
    signer: SignerOpts,

    #[command(flatten)]
    network: NetworkOpts,

    #[command(flatten)]
    gas: GasOpts,

    /// Shared gacha configuration table object.
    #[arg(long, env = "GACHA_CONFIG")]
    gacha_config: Address,

    #[arg(long, env = "SEEN_MESSAGES")]
    seen_messages: Address,

    #[arg(long, value_delimiter = ',', required = true)]
    token_types: Vec<u64>,

    #[arg(long, value_delimiter = ',', required = true)]
    amounts: Vec<u64>,

    #[arg(long)]
    expire_at: u64,

    #[arg(long)]
    salt: u64,

    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// Authority signature over the gacha message, 0x-hex.
    #[arg(long)]
    signed_message: String,
}

impl WithdrawGachaArgs {
    pub async fn run(self) -> Result<()> {
        if self.token_types.len() != self.amounts.len() {
            bail!(
                "--token-types and --amounts must be parallel: got {} and {}",
                self.token_types.len(),
                self.amounts.len()
            );
        }

        let signed_message = decode_hex_arg("signed-message", &self.signed_message)?;
        let signer = self.signer.build_signer().await?;
        let rpc = self.network.rpc();

        let config = rpc.object_ref(&self.gacha_config).await?;
        let seen = rpc.object_ref(&self.seen_messages).await?;
        let clock = rpc.object_ref(&well_known::clock()).await?;

        let call = MoveCall::new(self.network.package, GAME_MODULE, "withdraw_gacha")
            .object(config)
            .pure(pure::u64_vec(&self.token_types))
            .pure(pure::u64_vec(&self.amounts))
            .pure(pure::u64(self.expire_at))
            .pure(pure::u64(self.salt))
            .pure(pure::u64(self.chain_id))
            .pure(pure::address(&self.network.package))
            .pure(pure::bytes(&signed_message))
            .object(seen)
            .object(clock);

        submit_call(&*signer, &rpc, call, &self.gas).await
    }
}

// ─── admin ───────────────────────────────────────────────────────────

/// Mint game tokens from the treasury and transfer them.
#[derive(Args)]
pub struct MintTokenArgs {
    #[command(flatten)]
    signer: SignerOpts,

    #[command(flatten)]
    network: NetworkOpts,

    #[command(flatten)]
    gas: GasOpts,

    /// Treasury capability object.
    #[arg(long, env = "TREASURY_CAP")]
    treasury_cap: Address,

    #[arg(long)]
    amount: u64,

    #[arg(long)]
    recipient: Address,
}

impl MintTokenArgs {
    pub async fn run(self) -> Result<()> {
        let signer = self.signer.build_signer().await?;
        let rpc = self.network.rpc();

        let cap = rpc.object_ref(&self.treasury_cap).await?;
        let token_type = format!("{}::token::TOKEN", self.network.package.to_hex());

        let call = MoveCall::new(well_known::framework(), "coin", "mint_and_transfer")
            .type_arg(token_type)
            .object(cap)
            .pure(pure::u64(self.amount))
            .pure(pure::address(&self.recipient));

        submit_call(&*signer, &rpc, call, &self.gas).await
    }
}

/// Publish the authority's compressed public key to the replay guard.
#[derive(Args)]
pub struct SetAuthorityKeyArgs {
    #[command(flatten)]
    signer: SignerOpts,

    #[command(flatten)]
    network: NetworkOpts,

    #[command(flatten)]
    gas: GasOpts,

    #[arg(long, env = "TREASURY_CAP")]
    treasury_cap: Address,

    #[arg(long, env = "SEEN_MESSAGES")]
    seen_messages: Address,

    /// Authority public key: 33-byte compressed point, 0x-hex.
    #[arg(long)]
    authority_key: String,
}

impl SetAuthorityKeyArgs {
    pub async fn run(self) -> Result<()> {
        let authority_key = decode_hex_arg("authority-key", &self.authority_key)?;
        if authority_key.len() != 33 {
            bail!(
                "--authority-key must be a 33-byte compressed point, got {} bytes",
                authority_key.len()
            );
        }

        let signer = self.signer.build_signer().await?;
        let rpc = self.network.rpc();

        let cap = rpc.object_ref(&self.treasury_cap).await?;
        let seen = rpc.object_ref(&self.seen_messages).await?;

        let call = MoveCall::new(self.network.package, TREASURY_MODULE, "set_authority_pk")
            .object(cap)
            .pure(pure::bytes(&authority_key))
            .object(seen);

        submit_call(&*signer, &rpc, call, &self.gas).await
    }
}

// ─── shared submission path ──────────────────────────────────────────

/// Build the transaction around `call`, sign it, submit it, and report
/// the execution status.
async fn submit_call(
    signer: &dyn Signer,
    rpc: &LedgerRpc,
    call: MoveCall,
    gas: &GasOpts,
) -> Result<()> {
    let sender = signer.address().await?;
    let gas_payment = gas.payment(rpc).await?;

    let tx = TransactionData::new(sender, call, gas_payment, gas.gas_budget, gas.gas_price);
    let signed = tx.sign(signer).await?;

    let result = rpc.submit(&signed).await?;
    if !result.success {
        bail!(
            "execution failed ({}): {}",
            result.digest,
            result.error.unwrap_or_else(|| "unknown error".into())
        );
    }

    info!(digest = %result.digest, sender = %sender, "transaction executed");
    println!("digest: {}", result.digest);
    Ok(())
}
