//! BIP-39 mnemonic codec and seed stretching.
//!
//! Maps entropy bytes to a word sequence from the fixed 2048-word
//! English wordlist and back, and stretches a mnemonic into the
//! 64-byte seed consumed by key derivation:
//!
//! 1. **Encoding**: N-byte entropy → SHA-256 checksum bits folded into
//!    the final word → (3·N/4)-word phrase (32 bytes → 24 words).
//! 2. **Validation**: parsing a phrase re-derives the entropy and
//!    verifies the checksum, catching tampering and typos.
//! 3. **Seed stretching**: PBKDF2-HMAC-SHA512, 2048 rounds, salt
//!    `"mnemonic"`, no passphrase — bit-for-bit reproducible across
//!    implementations.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use std::str::FromStr;

use kestrel_types::{KestrelError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Entropy byte counts accepted by the codec (12 to 24 words).
///
/// The reference size is 32 bytes, yielding a 24-word mnemonic.
const SUPPORTED_ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A validated BIP-39 mnemonic phrase.
///
/// The inner string is zeroized on drop to prevent the recovery phrase
/// from lingering in memory. Parsing from a string validates wordlist
/// membership and the entropy checksum.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Returns the phrase as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

// Custom Debug — never display the phrase.
impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for Mnemonic {
    type Err = KestrelError;

    /// Parses and validates a phrase: every word must be in the
    /// wordlist and the checksum encoded in the final word must match
    /// the recovered entropy.
    fn from_str(phrase: &str) -> std::result::Result<Self, Self::Err> {
        let parsed: bip39::Mnemonic =
            phrase.parse().map_err(|e: bip39::Error| KestrelError::InvalidMnemonic {
                reason: e.to_string(),
            })?;
        Ok(Self(parsed.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed stretched from a mnemonic via PBKDF2-HMAC-SHA512.
///
/// Input to [`crate::derive::derive_wallet`]. Zeroized on drop; no
/// `Clone`/`Debug` to prevent leakage.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a stretched seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    ///
    /// Use this for reconstructing a seed from test vectors. For normal
    /// operation, use [`mnemonic_to_seed`].
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Converts raw entropy into a mnemonic phrase.
///
/// The final word's low bits carry a checksum computed from
/// `SHA-256(entropy)`, enabling tamper and typo detection when the
/// phrase is later decoded.
///
/// # Errors
///
/// Returns [`KestrelError::InvalidEntropyLength`] unless the length is
/// one of 16, 20, 24, 28, or 32 bytes.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<Mnemonic> {
    if !SUPPORTED_ENTROPY_LENGTHS.contains(&entropy.len()) {
        return Err(KestrelError::InvalidEntropyLength {
            actual: entropy.len(),
        });
    }

    let mnemonic =
        bip39::Mnemonic::from_entropy(entropy).map_err(|e| KestrelError::InvalidMnemonic {
            reason: e.to_string(),
        })?;
    Ok(Mnemonic(mnemonic.to_string()))
}

/// Stretches a mnemonic into a 64-byte seed.
///
/// PBKDF2-HMAC-SHA512 with 2048 rounds and salt `"mnemonic"` per
/// BIP-39. Kestrel derives seeds without a passphrase so that recovery
/// requires only the phrase itself.
///
/// # Errors
///
/// Returns [`KestrelError::InvalidMnemonic`] if the phrase fails
/// re-validation (cannot happen for a [`Mnemonic`] built by this
/// module, but guards against corrupted memory).
pub fn mnemonic_to_seed(mnemonic: &Mnemonic) -> Result<Seed> {
    let parsed: bip39::Mnemonic =
        mnemonic
            .as_str()
            .parse()
            .map_err(|e: bip39::Error| KestrelError::InvalidMnemonic {
                reason: e.to_string(),
            })?;
    let mut seed_bytes = parsed.to_seed("");
    let seed = Seed(seed_bytes);
    seed_bytes.zeroize();
    Ok(seed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
