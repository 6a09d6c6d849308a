//! # CLI Interface
//!
//! Command-line arguments for `btc1` using `clap` derive. Subcommands:
//! `create`, `signing-method`, `resolve` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use did_btc1::{IdentifierMode, Network};

use crate::logging::LogFormat;

/// did:btc1 identifier tool.
///
/// Creates Bitcoin-anchored DIDs, selects signing keys from their documents
/// and classifies identifiers for resolution. Results are printed to stdout
/// as JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "btc1",
    about = "Create and inspect did:btc1 identifiers",
    version,
    propagate_version = true
)]
pub struct Btc1Cli {
    /// Log output format.
    #[arg(long, global = true, env = "BTC1_LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new DID and print the DID, its document and, for fresh
    /// deterministic DIDs, the mnemonic.
    Create(CreateArgs),
    /// Print the verification method to sign with from a DID document.
    SigningMethod(SigningMethodArgs),
    /// Resolve a DID and print the resolution result.
    Resolve(ResolveArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Network: mainnet, testnet, signet or regtest.
    #[arg(long, short = 'n', env = "BTC1_NETWORK")]
    pub network: Option<String>,

    /// Identifier version. Version 1 omits the version and mode segments.
    #[arg(long = "did-version", env = "BTC1_VERSION")]
    pub did_version: Option<u32>,

    /// Identifier type: deterministic or sidecar.
    #[arg(long = "type", short = 't', env = "BTC1_TYPE")]
    pub mode: Option<IdentifierMode>,

    /// JSON file holding an array of services to use instead of the
    /// default beacons.
    #[arg(long, short = 's', env = "BTC1_SERVICES_FILE")]
    pub services: Option<PathBuf>,

    /// Derive the key from this BIP-39 phrase instead of fresh entropy.
    ///
    /// Prefer the environment variable over the flag so the phrase stays
    /// out of shell history.
    #[arg(long, env = "BTC1_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,
}

/// Arguments for the `signing-method` subcommand.
#[derive(Args, Debug)]
pub struct SigningMethodArgs {
    /// Path to the DID document (JSON). Use `-` for stdin.
    pub document: PathBuf,

    /// Verification method id or fragment, e.g. `#initialKey`.
    #[arg(long, short = 'm')]
    pub method_id: Option<String>,
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The DID to resolve.
    pub did: String,

    /// Beacon aggregator gateway.
    #[arg(long, env = "BTC1_AGGREGATOR_URI")]
    pub aggregator_uri: Option<String>,

    /// Network the DID is anchored on.
    #[arg(long, short = 'n', env = "BTC1_NETWORK")]
    pub network: Option<Network>,
}
