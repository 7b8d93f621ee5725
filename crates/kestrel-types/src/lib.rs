//! Core shared types for the Kestrel wallet key library.
//!
//! This crate defines the data model used across the workspace: key
//! material newtypes, the persisted wallet forms, and the central error
//! enum. No other crate should define shared types — everything lives
//! here.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private scalar (32 bytes).
///
/// Zeroized on drop so key material does not linger in memory after the
/// owning [`Wallet`] goes out of scope. `Debug` redacts the bytes;
/// serde renders them as a lowercase hex string for the encrypted
/// at-rest form (never persist this unencrypted).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// The fixed byte length of a private key.
    pub const LEN: usize = 32;

    /// Creates a `PrivateKey` from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for PrivateKey {}

// Custom Debug — never display the scalar.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"[REDACTED]").finish()
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut bytes = hex::decode(&s).map_err(D::Error::custom)?;
        if bytes.len() != Self::LEN {
            bytes.zeroize();
            return Err(D::Error::custom(format!(
                "expected {} bytes for private key, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(arr))
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A SEC1 compressed secp256k1 public key (33 bytes).
///
/// One parity prefix byte (`0x02` for even Y, `0x03` for odd Y)
/// followed by the 32-byte big-endian X coordinate.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// The fixed byte length of a compressed public key.
    pub const LEN: usize = 33;

    /// Creates a `PublicKey` from raw compressed-point bytes.
    pub fn new(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for PublicKey {
    type Err = KestrelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| KestrelError::Crypto {
            reason: "invalid hex encoding for public key".into(),
        })?;
        if bytes.len() != Self::LEN {
            return Err(KestrelError::Crypto {
                reason: format!("expected 33 bytes for public key, got {}", bytes.len()),
            });
        }
        let mut arr = [0u8; 33];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A derived keypair plus its bech32 address.
///
/// Immutable once created: `public_key` is the unique compressed-point
/// encoding of `private_key` on secp256k1, and `address` is the unique
/// bech32 encoding of `public_key`. Plaintext wallets are transient —
/// the store only ever persists the encrypted serialization.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// The 32-byte private scalar.
    pub private_key: PrivateKey,
    /// The 33-byte compressed public point.
    pub public_key: PublicKey,
    /// The bech32-encoded address (e.g. `cosmos1...`).
    pub address: String,
}

// ---------------------------------------------------------------------------
// StoredWallet
// ---------------------------------------------------------------------------

/// The persisted wallet envelope, keyed in the store by address.
///
/// `wallet` holds the at-rest ciphertext text
/// (`hex(salt) || hex(iv) || hex(ciphertext)`); the plaintext wallet
/// never touches the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredWallet {
    /// User-chosen wallet name, unique across the index.
    pub name: String,
    /// The wallet's bech32 address.
    pub address: String,
    /// Encrypted wallet serialization.
    pub wallet: String,
}

// ---------------------------------------------------------------------------
// IndexEntry
// ---------------------------------------------------------------------------

/// One row of the wallet index: a name/address pair.
///
/// The full index is an ordered sequence of entries; names are unique
/// and every stored wallet's address appears exactly once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// User-chosen wallet name.
    pub name: String,
    /// The wallet's bech32 address.
    pub address: String,
}

// ---------------------------------------------------------------------------
// KestrelError
// ---------------------------------------------------------------------------

/// Central error type for the Kestrel system.
///
/// All crates in the workspace convert their internal errors into
/// variants of this enum. Password failures are deliberately
/// indistinguishable from corrupted ciphertext — both surface as
/// [`KestrelError::IncorrectPassword`] — while remaining distinct from
/// [`KestrelError::WalletNotFound`] so callers can build recovery UX.
#[derive(Debug, Error)]
pub enum KestrelError {
    /// No cryptographically secure random source is available.
    #[error("secure entropy source unavailable: {reason}")]
    EntropyUnavailable {
        /// Description of why entropy could not be obtained.
        reason: String,
    },

    /// Entropy byte count is not one of the supported sizes.
    #[error("invalid entropy length: {actual} bytes (supported: 16, 20, 24, 28, or 32)")]
    InvalidEntropyLength {
        /// The rejected byte count.
        actual: usize,
    },

    /// The derived scalar is zero or not a valid secp256k1 key.
    #[error("invalid private key: not a nonzero secp256k1 scalar")]
    InvalidPrivateKey,

    /// A mnemonic phrase failed wordlist or checksum validation.
    #[error("invalid mnemonic: {reason}")]
    InvalidMnemonic {
        /// Description of the validation failure.
        reason: String,
    },

    /// A bech32 address is malformed or fails its checksum.
    #[error("invalid address: {reason}")]
    InvalidAddress {
        /// Description of why the address is invalid.
        reason: String,
    },

    /// No wallet entry exists for the requested address.
    #[error("no wallet stored for address {address}")]
    WalletNotFound {
        /// The address that was looked up.
        address: String,
    },

    /// Decryption output did not parse as a wallet.
    ///
    /// Covers both a wrong password and corrupted ciphertext; the two
    /// are intentionally not distinguishable.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A wallet entry already exists for this address.
    #[error("a wallet already exists for address {address}")]
    DuplicateAddress {
        /// The conflicting address.
        address: String,
    },

    /// The wallet name is already taken in the index.
    #[error("a wallet named '{name}' already exists")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// A cryptographic operation failed.
    #[error("crypto error: {reason}")]
    Crypto {
        /// Description of the cryptographic failure.
        reason: String,
    },

    /// A key-value store operation failed.
    #[error("storage error: {reason}")]
    Storage {
        /// Description of the storage failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`KestrelError`].
pub type Result<T> = std::result::Result<T, KestrelError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_wallet() -> Wallet {
        Wallet {
            private_key: PrivateKey::new([0x11; 32]),
            public_key: PublicKey::new([0x02; 33]),
            address: "cosmos1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v9ccrydpk8qarc0jqfc3xvv".into(),
        }
    }

    #[test]
    fn private_key_debug_redacts() {
        let key = PrivateKey::new([0xAB; 32]);
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("ab"), "debug output must not leak key bytes");
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn public_key_roundtrip_hex() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let pk = PublicKey::new([0x42; 33]);
        let parsed: PublicKey = pk.to_string().parse()?;
        assert_eq!(pk, parsed);
        Ok(())
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        let result: std::result::Result<PublicKey, _> = "abcd".parse();
        assert!(result.is_err());
    }

    #[test]
    fn wallet_serde_json_roundtrip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let wallet = test_wallet();
        let json = serde_json::to_string(&wallet)?;
        let parsed: Wallet = serde_json::from_str(&json)?;
        assert_eq!(wallet, parsed);
        Ok(())
    }

    #[test]
    fn wallet_serde_uses_camel_case_hex() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&test_wallet())?;
        assert!(json.contains("\"privateKey\""));
        assert!(json.contains("\"publicKey\""));
        assert!(json.contains(&"11".repeat(32)));
        Ok(())
    }

    #[test]
    fn wallet_rejects_short_private_key() {
        let json = r#"{"privateKey":"1111","publicKey":"02020202020202020202020202020202020202020202020202020202020202020202","address":"cosmos1x"}"#;
        let result: std::result::Result<Wallet, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn index_entry_roundtrip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let entry = IndexEntry {
            name: "savings".into(),
            address: "cosmos1r5v5srda7xfth3hn2s26txvrcrntldjumt8mhl".into(),
        };
        let json = serde_json::to_string(&entry)?;
        let parsed: IndexEntry = serde_json::from_str(&json)?;
        assert_eq!(entry, parsed);
        Ok(())
    }

    #[test]
    fn error_display_names_the_conflict() {
        let err = KestrelError::DuplicateName {
            name: "savings".into(),
        };
        assert!(err.to_string().contains("savings"));
    }

    #[test]
    fn incorrect_password_and_not_found_are_distinct() {
        let incorrect = KestrelError::IncorrectPassword;
        let missing = KestrelError::WalletNotFound {
            address: "cosmos1x".into(),
        };
        assert_ne!(incorrect.to_string(), missing.to_string());
    }
}
