//! # CLI Interface
//!
//! Defines the command-line argument structure for `keyseed` using `clap`
//! derive. Subcommands: `new`, `inspect`, `recover`, `phrase`, `validate`
//! and `version`.

use clap::{Args, Parser, Subcommand};

use keyseed_protocol::config::{Network, SeedVersion};
use keyseed_protocol::mnemonic::Locale;

/// Create, restore and inspect keyseed identities.
///
/// Everything happens offline. Secrets are only ever written to stdout,
/// never to logs.
#[derive(Parser, Debug)]
#[command(
    name = "keyseed",
    about = "Create, restore and inspect keyseed identities",
    version,
    propagate_version = true
)]
pub struct KeyseedCli {
    /// Log output format on stderr: `pretty` or `json`.
    #[arg(long, global = true, env = "KEYSEED_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `keyseed` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a fresh identity and print its seed, phrase and account number.
    New(NewArgs),
    /// Show everything derived from an encoded seed.
    Inspect(InspectArgs),
    /// Restore an identity from its recovery phrase.
    Recover(RecoverArgs),
    /// Print the recovery phrase for an encoded seed.
    Phrase(PhraseArgs),
    /// Check an account number. Exits with status 1 when it is invalid.
    Validate(ValidateArgs),
    /// Print version information and exit.
    Version,
}

/// Output options shared by commands that print an identity.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Word list for the printed recovery phrase.
    #[arg(long, default_value = "english")]
    pub locale: Locale,

    /// Print a single JSON object instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `new` subcommand.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Network for the new identity: `main` or `test`.
    #[arg(long, env = "KEYSEED_NETWORK", default_value = "main")]
    pub network: Network,

    /// Seed generation: `v1` (12 words) or `v2` (24 words).
    #[arg(long, env = "KEYSEED_SEED_VERSION", default_value = "v2")]
    pub seed_version: SeedVersion,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Base58 encoded seed.
    pub seed: String,

    /// Refuse a seed that belongs to another network.
    #[arg(long, env = "KEYSEED_NETWORK")]
    pub network: Option<Network>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `recover` subcommand.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// The 12 or 24 words, either as separate arguments or one quoted string.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Refuse a phrase whose seed belongs to another network.
    #[arg(long, env = "KEYSEED_NETWORK")]
    pub network: Option<Network>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `phrase` subcommand.
#[derive(Args, Debug)]
pub struct PhraseArgs {
    /// Base58 encoded seed.
    pub seed: String,

    /// Word list to write the phrase in.
    #[arg(long, default_value = "english")]
    pub locale: Locale,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Account number to check.
    pub account_number: String,

    /// Also require the account number to belong to this network.
    #[arg(long, env = "KEYSEED_NETWORK")]
    pub network: Option<Network>,
}
