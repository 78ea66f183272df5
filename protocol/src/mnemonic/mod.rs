//! # Recovery Phrases
//!
//! Seeds written out as words. The encoding is a plain 11-bit big-endian
//! split of the entropy with **no** BIP-39 checksum word; integrity comes
//! from the seed layer (the V1 network flag, the V2 network byte), not from
//! the phrase.
//!
//! ```text
//! 17 bytes (V1 core)              -> 12 words (132 bits, 4 bits dropped)
//! 33 bytes (V2 network ∥ core)    -> 24 words (264 bits)
//! ```
//!
//! Going back, a 12-word phrase yields 16 full bytes plus its 4 leftover
//! bits as the high nibble of a 17th byte. That nibble is exactly what the
//! V1 generator put there, so decoding is lossless.
//!
//! Word lists are the standard BIP-39 lists shipped with the `bip39` crate.
//! Each locale gets a word→index table built once on first use.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::{SeedVersion, BITS_PER_WORD, WORD_LIST_SIZE};

const WORD_MASK: u32 = (WORD_LIST_SIZE as u32) - 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from converting between entropy and words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    /// Phrases are 12 or 24 words. Nothing else is even looked up.
    #[error("invalid word count {0}: expected 12 or 24")]
    WordCount(usize),

    /// The first word belongs to no supported word list.
    #[error("unsupported locale: '{0}' is not in any word list")]
    UnsupportedLocale(String),

    /// A later word is missing from the locale picked by the first word.
    #[error("unknown word '{0}'")]
    UnknownWord(String),

    /// Entropy of a size no seed generation produces.
    #[error("unsupported entropy length {0}: expected 17 or 33 bytes")]
    UnsupportedEntropyLength(usize),

    /// A locale name that could not be parsed.
    #[error("unknown locale '{0}': expected 'english' or 'chinese-traditional'")]
    UnknownLocale(String),
}

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// Word list a phrase is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    English,
    ChineseTraditional,
}

impl Locale {
    /// Detection order when reading a phrase.
    pub const ALL: [Locale; 2] = [Locale::English, Locale::ChineseTraditional];

    fn language(self) -> bip39::Language {
        match self {
            Locale::English => bip39::Language::English,
            Locale::ChineseTraditional => bip39::Language::TraditionalChinese,
        }
    }

    /// The 2048 words of this locale, in index order.
    pub fn word_list(self) -> &'static [&'static str; WORD_LIST_SIZE] {
        self.language().word_list()
    }

    /// Index of `word` in this locale, if present. `word` must already be
    /// normalized (see [`Locale::normalize`]).
    pub fn index_of(self, word: &str) -> Option<u16> {
        word_index(self).get(word).copied()
    }

    /// Trims the word and, for English, lower-cases it.
    pub fn normalize(self, word: &str) -> String {
        let word = word.trim();
        match self {
            Locale::English => word.to_lowercase(),
            Locale::ChineseTraditional => word.to_string(),
        }
    }

    /// First locale whose list contains `word`.
    pub fn detect(word: &str) -> Option<Locale> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.index_of(&locale.normalize(word)).is_some())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "english"),
            Locale::ChineseTraditional => write!(f, "chinese-traditional"),
        }
    }
}

impl FromStr for Locale {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Locale::English),
            "chinese-traditional" | "zh-tw" | "zh-hant" => Ok(Locale::ChineseTraditional),
            other => Err(MnemonicError::UnknownLocale(other.to_string())),
        }
    }
}

fn word_index(locale: Locale) -> &'static HashMap<&'static str, u16> {
    static ENGLISH: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();
    static CHINESE_TRADITIONAL: OnceLock<HashMap<&'static str, u16>> = OnceLock::new();

    let cell = match locale {
        Locale::English => &ENGLISH,
        Locale::ChineseTraditional => &CHINESE_TRADITIONAL,
    };
    cell.get_or_init(|| {
        trace!(%locale, "building word index");
        locale
            .word_list()
            .iter()
            .enumerate()
            .map(|(i, word)| (*word, i as u16))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Splits seed entropy into words.
///
/// Only 17-byte (12 words) and 33-byte (24 words) entropy is accepted.
pub fn entropy_to_words(
    entropy: &[u8],
    locale: Locale,
) -> Result<Vec<&'static str>, MnemonicError> {
    let version = SeedVersion::from_entropy_length(entropy.len())
        .ok_or(MnemonicError::UnsupportedEntropyLength(entropy.len()))?;
    let list = locale.word_list();

    let mut words = Vec::with_capacity(version.word_count());
    let mut acc: u32 = 0;
    let mut bits = 0usize;
    for &byte in entropy {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        if bits >= BITS_PER_WORD {
            bits -= BITS_PER_WORD;
            words.push(list[((acc >> bits) & WORD_MASK) as usize]);
        }
        acc &= (1 << bits) - 1;
    }
    acc.zeroize();

    debug_assert_eq!(words.len(), version.word_count());
    Ok(words)
}

/// Reads a phrase back into seed entropy, reporting the detected locale.
///
/// Checks, in order: word count, locale of the first word, membership of
/// every word in that locale.
pub fn words_to_entropy<S: AsRef<str>>(
    words: &[S],
) -> Result<(Zeroizing<Vec<u8>>, Locale), MnemonicError> {
    let version =
        SeedVersion::from_word_count(words.len()).ok_or(MnemonicError::WordCount(words.len()))?;

    let first = words[0].as_ref();
    let locale = Locale::detect(first)
        .ok_or_else(|| MnemonicError::UnsupportedLocale(first.trim().to_string()))?;

    let mut entropy = Zeroizing::new(Vec::with_capacity(version.entropy_length()));
    let mut acc: u32 = 0;
    let mut bits = 0usize;
    for word in words {
        let normalized = locale.normalize(word.as_ref());
        let index = locale
            .index_of(&normalized)
            .ok_or_else(|| MnemonicError::UnknownWord(normalized.clone()))?;
        acc = (acc << BITS_PER_WORD) | u32::from(index);
        bits += BITS_PER_WORD;
        while bits >= 8 {
            bits -= 8;
            entropy.push((acc >> bits) as u8);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        // 12 words leave 4 bits over: they are the high nibble of byte 16.
        entropy.push((acc << (8 - bits)) as u8);
    }
    acc.zeroize();

    debug_assert_eq!(entropy.len(), version.entropy_length());
    Ok((entropy, locale))
}

// ---------------------------------------------------------------------------
// RecoveryPhrase
// ---------------------------------------------------------------------------

/// A validated phrase together with its locale.
///
/// Words are stored normalized. `Debug` never prints them.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RecoveryPhrase {
    words: Vec<String>,
    #[zeroize(skip)]
    locale: Locale,
}

impl RecoveryPhrase {
    /// Encodes seed entropy as a phrase in `locale`.
    pub fn from_entropy(entropy: &[u8], locale: Locale) -> Result<Self, MnemonicError> {
        let words = entropy_to_words(entropy, locale)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(Self { words, locale })
    }

    /// Validates user-supplied words.
    pub fn parse<S: AsRef<str>>(words: &[S]) -> Result<Self, MnemonicError> {
        let (_, locale) = words_to_entropy(words)?;
        let words = words.iter().map(|w| locale.normalize(w.as_ref())).collect();
        Ok(Self { words, locale })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The seed entropy this phrase spells.
    pub fn entropy(&self) -> Result<Zeroizing<Vec<u8>>, MnemonicError> {
        words_to_entropy(&self.words).map(|(entropy, _)| entropy)
    }
}

impl fmt::Display for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

impl fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryPhrase")
            .field("locale", &self.locale)
            .field("words", &self.words.len())
            .finish()
    }
}

impl FromStr for RecoveryPhrase {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        Self::parse(&words)
    }
}
