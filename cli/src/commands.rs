//! Subcommand handlers. Each returns what `main` should exit with.

use anyhow::{Context, Result};
use serde::Serialize;
use std::process::ExitCode;

use keyseed_protocol::config::{IdentityConfig, Network, SeedVersion};
use keyseed_protocol::identity::{AccountIdentity, AccountNumber, AddressError, IdentityError};
use keyseed_protocol::mnemonic::Locale;

use crate::cli::{InspectArgs, NewArgs, OutputArgs, PhraseArgs, RecoverArgs, ValidateArgs};

/// Everything `new`, `inspect` and `recover` print about an identity.
#[derive(Debug, Serialize)]
pub struct IdentityReport {
    pub account_number: String,
    pub network: Network,
    pub seed_version: SeedVersion,
    pub encoded_seed: String,
    pub locale: Locale,
    pub recovery_phrase: String,
    pub auth_public_key: String,
    pub enc_public_key: String,
}

impl IdentityReport {
    pub fn new(identity: &AccountIdentity, locale: Locale) -> Self {
        Self {
            account_number: identity.account_number().to_string(),
            network: identity.network(),
            seed_version: identity.seed().version(),
            encoded_seed: identity.encoded_seed(),
            locale,
            recovery_phrase: identity.recovery_phrase(locale).to_string(),
            auth_public_key: identity.signing_keypair().public_key().to_hex(),
            enc_public_key: identity.encryption_keypair().public_key_hex(),
        }
    }

    fn print(&self, output: OutputArgs) -> Result<()> {
        if output.json {
            let json =
                serde_json::to_string_pretty(self).context("failed to serialize identity")?;
            println!("{json}");
        } else {
            println!("Account number : {}", self.account_number);
            println!("  Network      : {}", self.network);
            println!("  Seed version : {}", self.seed_version);
            println!("  Encoded seed : {}", self.encoded_seed);
            println!("  Phrase       : {}", self.recovery_phrase);
            println!("  Auth key     : {}", self.auth_public_key);
            println!("  Enc key      : {}", self.enc_public_key);
        }
        Ok(())
    }
}

pub fn new_identity(args: NewArgs) -> Result<ExitCode> {
    let config = IdentityConfig::new(args.network, args.seed_version);
    let identity = AccountIdentity::create_with(&config);
    tracing::info!(
        account = %identity.account_number(),
        network = %config.network,
        version = %config.seed_version,
        "identity created"
    );
    IdentityReport::new(&identity, args.output.locale).print(args.output)?;
    Ok(ExitCode::SUCCESS)
}

fn network_config(network: Network) -> IdentityConfig {
    IdentityConfig {
        network,
        ..IdentityConfig::default()
    }
}

fn identity_from_seed(args: &InspectArgs) -> Result<AccountIdentity, IdentityError> {
    match args.network {
        Some(network) => AccountIdentity::from_encoded_seed_for(&args.seed, &network_config(network)),
        None => AccountIdentity::from_encoded_seed(&args.seed),
    }
}

fn identity_from_phrase(args: &RecoverArgs) -> Result<AccountIdentity, IdentityError> {
    // Accept both `recover w1 w2 ...` and `recover "w1 w2 ..."`.
    let words: Vec<&str> = args
        .words
        .iter()
        .flat_map(|arg| arg.split_whitespace())
        .collect();
    match args.network {
        Some(network) => {
            AccountIdentity::from_recovery_phrase_for(&words, &network_config(network))
        }
        None => AccountIdentity::from_recovery_phrase(&words),
    }
}

pub fn inspect(args: InspectArgs) -> Result<ExitCode> {
    let identity = identity_from_seed(&args).context("could not read encoded seed")?;
    IdentityReport::new(&identity, args.output.locale).print(args.output)?;
    Ok(ExitCode::SUCCESS)
}

pub fn recover(args: RecoverArgs) -> Result<ExitCode> {
    let identity =
        identity_from_phrase(&args).context("could not restore identity from phrase")?;
    tracing::info!(account = %identity.account_number(), "identity restored");
    IdentityReport::new(&identity, args.output.locale).print(args.output)?;
    Ok(ExitCode::SUCCESS)
}

pub fn phrase(args: PhraseArgs) -> Result<ExitCode> {
    let identity =
        AccountIdentity::from_encoded_seed(&args.seed).context("could not read encoded seed")?;
    println!("{}", identity.recovery_phrase(args.locale));
    Ok(ExitCode::SUCCESS)
}

fn check_account_number(args: &ValidateArgs) -> Result<AccountNumber, AddressError> {
    match args.network {
        Some(network) => AccountNumber::parse_for(&args.account_number, network),
        None => AccountNumber::parse(&args.account_number),
    }
}

pub fn validate(args: ValidateArgs) -> Result<ExitCode> {
    match check_account_number(&args) {
        Ok(account) => {
            println!("valid");
            println!("  Network    : {}", account.network());
            println!("  Public key : {}", account.public_key());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "account number rejected");
            println!("invalid: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints version information to stdout.
pub fn print_version() {
    println!("keyseed {}", env!("CARGO_PKG_VERSION"));
    println!("rustc   {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2_SEED: &str = "5XEECt18HGBGNET1PpxLhy5CsCLG9jnmM6Q8QGF4U2yGb1DABXZsVeD";

    #[test]
    fn report_for_known_seed() {
        let identity = AccountIdentity::from_encoded_seed(V2_SEED).unwrap();
        let report = IdentityReport::new(&identity, Locale::English);
        assert_eq!(
            report.account_number,
            "ec6yMcJATX6gjNwvqp8rbc4jNEasoUgbfBBGGyV5NvoJ54NXva"
        );
        assert_eq!(report.network, Network::Test);
        assert_eq!(report.seed_version, SeedVersion::V2);
        assert_eq!(report.recovery_phrase.split(' ').count(), 24);
    }

    #[test]
    fn report_json_field_names() {
        let identity = AccountIdentity::from_encoded_seed(V2_SEED).unwrap();
        let report = IdentityReport::new(&identity, Locale::ChineseTraditional);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["network"], "test");
        assert_eq!(value["seed_version"], "v2");
        assert_eq!(value["locale"], "chinese-traditional");
        assert_eq!(value["encoded_seed"], V2_SEED);
    }

    #[test]
    fn inspect_checks_network_when_given() {
        let args = |network| InspectArgs {
            seed: V2_SEED.to_string(),
            network,
            output: OutputArgs {
                locale: Locale::English,
                json: false,
            },
        };
        assert!(identity_from_seed(&args(None)).is_ok());
        assert!(identity_from_seed(&args(Some(Network::Test))).is_ok());
        assert!(matches!(
            identity_from_seed(&args(Some(Network::Main))),
            Err(IdentityError::InvalidSeed(_))
        ));
    }

    #[test]
    fn recover_checks_network_when_given() {
        let identity = AccountIdentity::from_encoded_seed(V2_SEED).unwrap();
        let phrase = identity.recovery_phrase(Locale::English).to_string();
        let args = |network| RecoverArgs {
            words: vec![phrase.clone()],
            network,
            output: OutputArgs {
                locale: Locale::English,
                json: false,
            },
        };
        assert_eq!(
            identity_from_phrase(&args(None)).unwrap().encoded_seed(),
            V2_SEED
        );
        assert!(matches!(
            identity_from_phrase(&args(Some(Network::Main))),
            Err(IdentityError::InvalidPhraseSeed(_))
        ));
    }

    #[test]
    fn validate_checks_network_when_given() {
        let account = "ec6yMcJATX6gjNwvqp8rbc4jNEasoUgbfBBGGyV5NvoJ54NXva".to_string();
        let any = ValidateArgs {
            account_number: account.clone(),
            network: None,
        };
        assert!(check_account_number(&any).is_ok());

        let main = ValidateArgs {
            account_number: account,
            network: Some(Network::Main),
        };
        assert!(matches!(
            check_account_number(&main),
            Err(AddressError::NetworkMismatch { .. })
        ));
    }
}
