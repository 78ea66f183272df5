//! # Account Identity
//!
//! Ties a seed to everything derived from it. Keys are derived once, at
//! construction, and the identity is immutable afterwards.

use std::fmt;
use thiserror::Error;
use tracing::debug;

use super::account_number::{AccountNumber, AddressError};
use crate::config::{IdentityConfig, Network};
use crate::crypto::keys::{EncryptionKeypair, Signature, SigningKeypair};
use crate::mnemonic::{words_to_entropy, Locale, MnemonicError, RecoveryPhrase};
use crate::seed::{Seed, SeedError};

/// Errors from building or using an [`AccountIdentity`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Encoded seed text that does not decode, or a seed on the wrong
    /// network.
    #[error("invalid seed")]
    InvalidSeed(#[source] SeedError),

    /// A phrase that is not a well-formed list of words.
    #[error("invalid recovery phrase")]
    InvalidRecoveryPhrase(#[source] MnemonicError),

    /// Well-formed words whose entropy is not a valid seed (e.g. a V1 core
    /// with an unreadable network flag).
    #[error("recovery phrase does not encode a valid seed")]
    InvalidPhraseSeed(#[source] SeedError),
}

/// A complete account: seed, both keypairs and the account number.
///
/// # Examples
///
/// ```
/// use keyseed_protocol::config::Network;
/// use keyseed_protocol::identity::AccountIdentity;
///
/// let identity = AccountIdentity::create(Network::Test);
/// let restored = AccountIdentity::from_encoded_seed(&identity.encoded_seed()).unwrap();
/// assert_eq!(restored.account_number(), identity.account_number());
/// ```
#[derive(Clone)]
pub struct AccountIdentity {
    seed: Seed,
    auth: SigningKeypair,
    enc: EncryptionKeypair,
    account_number: AccountNumber,
}

impl AccountIdentity {
    /// New random identity on `network`, using the default (V2) seed.
    pub fn create(network: Network) -> Self {
        Self::create_with(&IdentityConfig {
            network,
            ..IdentityConfig::default()
        })
    }

    /// New random identity with the network and seed generation from
    /// `config`.
    pub fn create_with(config: &IdentityConfig) -> Self {
        let identity = Self::from_seed(Seed::generate(config.seed_version, config.network));
        debug!(
            version = %config.seed_version,
            network = %config.network,
            account = %identity.account_number,
            "created identity"
        );
        identity
    }

    /// Derives keys and the account number from an existing seed.
    pub fn from_seed(seed: Seed) -> Self {
        let auth = seed.auth_keypair();
        let enc = seed.enc_keypair();
        let account_number = AccountNumber::new(auth.public_key(), seed.network());
        Self {
            seed,
            auth,
            enc,
            account_number,
        }
    }

    /// Like [`from_seed`](Self::from_seed), but refuses a seed that is not
    /// on `config.network`.
    pub fn from_seed_for(seed: Seed, config: &IdentityConfig) -> Result<Self, IdentityError> {
        let seed = seed
            .require_network(config.network)
            .map_err(IdentityError::InvalidSeed)?;
        Ok(Self::from_seed(seed))
    }

    /// Restores an identity from seed text of either generation.
    pub fn from_encoded_seed(text: &str) -> Result<Self, IdentityError> {
        let seed = Seed::from_encoded(text).map_err(IdentityError::InvalidSeed)?;
        Ok(Self::from_seed(seed))
    }

    /// Restores an identity from seed text and requires it to be on
    /// `config.network`.
    pub fn from_encoded_seed_for(
        text: &str,
        config: &IdentityConfig,
    ) -> Result<Self, IdentityError> {
        let seed = Seed::from_encoded(text).map_err(IdentityError::InvalidSeed)?;
        Self::from_seed_for(seed, config)
    }

    /// Restores an identity from a 12- or 24-word phrase.
    pub fn from_recovery_phrase<S: AsRef<str>>(words: &[S]) -> Result<Self, IdentityError> {
        let seed = Self::seed_from_phrase(words)?;
        Ok(Self::from_seed(seed))
    }

    /// Restores an identity from a phrase and requires it to be on
    /// `config.network`.
    pub fn from_recovery_phrase_for<S: AsRef<str>>(
        words: &[S],
        config: &IdentityConfig,
    ) -> Result<Self, IdentityError> {
        let seed = Self::seed_from_phrase(words)?
            .require_network(config.network)
            .map_err(IdentityError::InvalidPhraseSeed)?;
        Ok(Self::from_seed(seed))
    }

    fn seed_from_phrase<S: AsRef<str>>(words: &[S]) -> Result<Seed, IdentityError> {
        let (entropy, locale) =
            words_to_entropy(words).map_err(IdentityError::InvalidRecoveryPhrase)?;
        let seed = Seed::from_entropy(&entropy).map_err(IdentityError::InvalidPhraseSeed)?;
        debug!(%locale, version = %seed.version(), "restored seed from phrase");
        Ok(seed)
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn encoded_seed(&self) -> String {
        self.seed.encode()
    }

    /// The seed written out as words in `locale`.
    pub fn recovery_phrase(&self, locale: Locale) -> RecoveryPhrase {
        RecoveryPhrase::from_entropy(&self.seed.entropy(), locale)
            .expect("seed entropy is always 17 or 33 bytes")
    }

    pub fn signing_keypair(&self) -> &SigningKeypair {
        &self.auth
    }

    pub fn encryption_keypair(&self) -> &EncryptionKeypair {
        &self.enc
    }

    pub fn network(&self) -> Network {
        self.seed.network()
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Signs `message` with the auth key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.auth.sign(message)
    }

    /// Checks a signature against the key inside an account number.
    ///
    /// Returns `false` for an unparseable account number as well as for a
    /// bad signature.
    pub fn verify(account_number: &str, message: &[u8], signature: &Signature) -> bool {
        match AccountNumber::parse(account_number) {
            Ok(account) => account.public_key().verify(message, signature),
            Err(_) => false,
        }
    }

    pub fn parse_account_number(text: &str) -> Result<AccountNumber, AddressError> {
        AccountNumber::parse(text)
    }

    /// Parses an account number and requires it to be on `config.network`.
    pub fn parse_account_number_for(
        text: &str,
        config: &IdentityConfig,
    ) -> Result<AccountNumber, AddressError> {
        AccountNumber::parse_for(text, config.network)
    }

    pub fn is_valid_account_number(text: &str) -> bool {
        AccountNumber::parse(text).is_ok()
    }
}

impl fmt::Debug for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountIdentity")
            .field("account_number", &self.account_number.encode())
            .field("version", &self.seed.version())
            .field("network", &self.network())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedVersion;
    use crate::seed::SeedV1;

    #[test]
    fn test_create_defaults_to_v2() {
        let identity = AccountIdentity::create(Network::Main);
        assert_eq!(identity.seed().version(), SeedVersion::V2);
        assert_eq!(identity.network(), Network::Main);
        assert_eq!(identity.recovery_phrase(Locale::English).len(), 24);
    }

    #[test]
    fn test_create_with_v1() {
        let config = IdentityConfig::new(Network::Test, SeedVersion::V1);
        let identity = AccountIdentity::create_with(&config);
        assert_eq!(identity.seed().version(), SeedVersion::V1);
        assert_eq!(identity.account_number().network(), Network::Test);
        assert_eq!(identity.recovery_phrase(Locale::English).len(), 12);
    }

    #[test]
    fn test_encoded_seed_restores_same_account() {
        for version in [SeedVersion::V1, SeedVersion::V2] {
            for network in [Network::Main, Network::Test] {
                let identity = AccountIdentity::create_with(&IdentityConfig::new(network, version));
                let restored = AccountIdentity::from_encoded_seed(&identity.encoded_seed()).unwrap();
                assert_eq!(restored.account_number(), identity.account_number());
                assert_eq!(restored.signing_keypair(), identity.signing_keypair());
                assert_eq!(restored.encryption_keypair(), identity.encryption_keypair());
            }
        }
    }

    #[test]
    fn test_phrase_restores_same_account() {
        for version in [SeedVersion::V1, SeedVersion::V2] {
            for locale in Locale::ALL {
                let identity =
                    AccountIdentity::create_with(&IdentityConfig::new(Network::Test, version));
                let phrase = identity.recovery_phrase(locale);
                assert_eq!(phrase.locale(), locale);
                let restored = AccountIdentity::from_recovery_phrase(phrase.words()).unwrap();
                assert_eq!(restored.account_number(), identity.account_number());
                assert_eq!(restored.encoded_seed(), identity.encoded_seed());
            }
        }
    }

    #[test]
    fn test_bad_seed_wrapped() {
        assert!(matches!(
            AccountIdentity::from_encoded_seed("not base58 0OIl"),
            Err(IdentityError::InvalidSeed(SeedError::Codec(_)))
        ));
    }

    #[test]
    fn test_bad_phrase_wrapped() {
        let words = vec!["abandon"; 13];
        assert_eq!(
            AccountIdentity::from_recovery_phrase(&words).unwrap_err(),
            IdentityError::InvalidRecoveryPhrase(MnemonicError::WordCount(13))
        );
    }

    #[test]
    fn test_phrase_with_unreadable_v1_network() {
        // Every word is in the list, but the flag nibble matches neither
        // network.
        let mut core = crate::seed::v1::core_from_random(&[0u8; 16], Network::Main);
        core[15] = 0x30;
        assert!(SeedV1::from_core(&core).is_err());
        let words = crate::mnemonic::entropy_to_words(&core, Locale::English).unwrap();
        assert_eq!(
            AccountIdentity::from_recovery_phrase(&words).unwrap_err(),
            IdentityError::InvalidPhraseSeed(SeedError::UnrecoverableNetwork)
        );
    }

    #[test]
    fn test_seed_on_wrong_network_refused() {
        let test = IdentityConfig::new(Network::Test, SeedVersion::V2);
        let main_seeds = [
            Seed::from_entropy(&hex::decode("ba0e357d9157a1a7299fbc4cb4c933bd00").unwrap()).unwrap(),
            Seed::from_entropy(&hex::decode("00d00c884d08394698fbffbb6259d646b0").unwrap()).unwrap(),
            Seed::from_core(
                &hex::decode("7b95d37f92c904949f79784c7855606b6a2d60416f01441671f4132cef60b607")
                    .unwrap(),
                Network::Main,
            )
            .unwrap(),
        ];
        let mismatch = || SeedError::NetworkMismatch {
            expected: Network::Test,
            actual: Network::Main,
        };
        for seed in main_seeds {
            assert!(AccountIdentity::from_seed_for(seed.clone(), &IdentityConfig::default()).is_ok());
            assert_eq!(
                AccountIdentity::from_encoded_seed_for(&seed.encode(), &test).unwrap_err(),
                IdentityError::InvalidSeed(mismatch())
            );
            let words = crate::mnemonic::entropy_to_words(&seed.entropy(), Locale::English).unwrap();
            assert_eq!(
                AccountIdentity::from_recovery_phrase_for(&words, &test).unwrap_err(),
                IdentityError::InvalidPhraseSeed(mismatch())
            );
            assert_eq!(
                AccountIdentity::from_seed_for(seed, &test).unwrap_err(),
                IdentityError::InvalidSeed(mismatch())
            );
        }
    }

    #[test]
    fn test_seed_on_configured_network_accepted() {
        let config = IdentityConfig::new(Network::Test, SeedVersion::V1);
        let identity = AccountIdentity::create_with(&config);
        let restored =
            AccountIdentity::from_encoded_seed_for(&identity.encoded_seed(), &config).unwrap();
        assert_eq!(restored.account_number(), identity.account_number());
        let phrase = identity.recovery_phrase(Locale::ChineseTraditional);
        let restored = AccountIdentity::from_recovery_phrase_for(phrase.words(), &config).unwrap();
        assert_eq!(restored.account_number(), identity.account_number());
    }

    #[test]
    fn test_sign_and_verify_by_account_number() {
        let identity = AccountIdentity::create(Network::Main);
        let account = identity.account_number().encode();
        let signature = identity.sign(b"transfer asset 42");
        assert!(AccountIdentity::verify(&account, b"transfer asset 42", &signature));
        assert!(!AccountIdentity::verify(&account, b"transfer asset 43", &signature));
        assert!(!AccountIdentity::verify("garbage", b"transfer asset 42", &signature));
    }

    #[test]
    fn test_parse_account_number_for_config() {
        let identity = AccountIdentity::create(Network::Test);
        let text = identity.account_number().encode();
        let test = IdentityConfig::new(Network::Test, SeedVersion::V2);
        let main = IdentityConfig::default();
        assert!(AccountIdentity::parse_account_number_for(&text, &test).is_ok());
        assert!(matches!(
            AccountIdentity::parse_account_number_for(&text, &main),
            Err(AddressError::NetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_is_valid_account_number() {
        let identity = AccountIdentity::create(Network::Main);
        assert!(AccountIdentity::is_valid_account_number(
            &identity.account_number().to_string()
        ));
        assert!(!AccountIdentity::is_valid_account_number(""));
        assert!(!AccountIdentity::is_valid_account_number("hello"));
    }

    #[test]
    fn test_shared_secret_between_identities() {
        let alice = AccountIdentity::create(Network::Main);
        let bob = AccountIdentity::create(Network::Main);
        let ab = alice
            .encryption_keypair()
            .diffie_hellman(&bob.encryption_keypair().public_key_bytes());
        let ba = bob
            .encryption_keypair()
            .diffie_hellman(&alice.encryption_keypair().public_key_bytes());
        assert_eq!(*ab, *ba);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let identity = AccountIdentity::create(Network::Main);
        let debug = format!("{identity:?}");
        assert!(debug.contains(&identity.account_number().encode()));
        assert!(!debug.contains(&identity.encoded_seed()));
    }
}
