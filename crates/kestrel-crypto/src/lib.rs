//! Cryptographic primitives for the Kestrel wallet key library.
//!
//! This crate is the **sole** location for all cryptographic operations.
//! No other crate in the workspace may perform raw crypto directly.
//!
//! # Modules
//!
//! - [`entropy`] — secure random byte generation behind an injectable source
//! - [`mnemonic`] — BIP-39 entropy ↔ word sequence codec and seed stretching
//! - [`derive`] — seed → secp256k1 keypair → [`kestrel_types::Wallet`]
//! - [`address`] — compressed public key → bech32 `cosmos` address
//! - [`signer`] — canonical-JSON ECDSA signing with deterministic nonces
//! - [`cipher`] — password-based AES-256-CBC encryption for wallets at rest

pub mod address;
pub mod cipher;
pub mod derive;
pub mod entropy;
pub mod mnemonic;
pub mod signer;
