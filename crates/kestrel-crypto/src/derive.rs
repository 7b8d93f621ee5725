//! Deterministic secp256k1 wallet derivation.
//!
//! Stretches a BIP-39 seed into a single keypair at the fixed Cosmos
//! BIP-44 path `m/44'/118'/0'/0/0`. Each BIP-32 step interprets the
//! left half of an HMAC-SHA512 output as the candidate scalar, reduced
//! modulo the curve order; a zero or out-of-range result is rejected
//! as [`KestrelError::InvalidPrivateKey`].
//!
//! Determinism is mandatory: identical entropy always yields the same
//! private key, public key, and address on every platform.

use std::str::FromStr;

use bip32::{DerivationPath, XPrv};
use kestrel_types::{KestrelError, PrivateKey, PublicKey, Result, Wallet};

use crate::address::encode_address;
use crate::mnemonic::{entropy_to_mnemonic, mnemonic_to_seed, Mnemonic, Seed};

/// Fixed derivation path: one keypair per seed (Cosmos coin type 118).
const HD_PATH: &str = "m/44'/118'/0'/0/0";

/// Entropy size used for freshly generated wallets (24-word mnemonic).
const ENTROPY_BYTES: usize = 32;

/// Derives a [`Wallet`] from a stretched seed.
///
/// The public key is serialized as the SEC1 compressed point: a parity
/// prefix byte (`0x02` even Y / `0x03` odd Y) followed by the 32-byte
/// big-endian X coordinate. The address is the bech32 encoding of that
/// compressed point (see [`crate::address`]).
///
/// # Errors
///
/// Returns [`KestrelError::InvalidPrivateKey`] if any derivation step
/// produces a zero or out-of-range scalar.
pub fn derive_wallet(seed: &Seed) -> Result<Wallet> {
    let path = DerivationPath::from_str(HD_PATH).map_err(|e| KestrelError::Crypto {
        reason: format!("invalid derivation path '{HD_PATH}': {e}"),
    })?;

    let mut xprv = XPrv::new(seed.as_bytes()).map_err(|_| KestrelError::InvalidPrivateKey)?;
    for child in path {
        xprv = xprv
            .derive_child(child)
            .map_err(|_| KestrelError::InvalidPrivateKey)?;
    }

    let signing_key = xprv.private_key();
    let private_bytes: [u8; 32] = signing_key.to_bytes().into();

    let point = signing_key.verifying_key().to_encoded_point(true);
    let mut public_bytes = [0u8; 33];
    public_bytes.copy_from_slice(point.as_bytes());

    let public_key = PublicKey::new(public_bytes);
    let address = encode_address(&public_key)?;

    Ok(Wallet {
        private_key: PrivateKey::new(private_bytes),
        public_key,
        address,
    })
}

/// Derives a wallet from an existing mnemonic: seed stretching followed
/// by [`derive_wallet`].
pub fn wallet_from_mnemonic(mnemonic: &Mnemonic) -> Result<Wallet> {
    let seed = mnemonic_to_seed(mnemonic)?;
    derive_wallet(&seed)
}

/// Generates a fresh wallet: entropy → mnemonic → seed → keypair.
///
/// The entropy function is caller-injectable so tests can supply
/// deterministic vectors, including closures replaying a captured
/// recording; production callers pass
/// [`crate::entropy::generate_entropy`]. Returns the mnemonic alongside
/// the wallet so the recovery phrase can be shown to the user exactly
/// once.
///
/// # Errors
///
/// Propagates [`KestrelError::EntropyUnavailable`] from the entropy
/// source and any mnemonic or derivation failure.
pub fn new_wallet<F>(entropy_fn: F) -> Result<(Mnemonic, Wallet)>
where
    F: Fn(usize) -> Result<Vec<u8>>,
{
    let entropy = entropy_fn(ENTROPY_BYTES)?;
    let mnemonic = entropy_to_mnemonic(&entropy)?;
    let wallet = wallet_from_mnemonic(&mnemonic)?;
    Ok((mnemonic, wallet))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
