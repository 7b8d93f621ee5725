//! Encrypted wallet persistence for Kestrel.
//!
//! Wallets are encrypted with a password-derived key and written to a
//! generic key-value store alongside a name/address index. The store
//! never sees plaintext key material.
//!
//! # Modules
//!
//! - [`kv`] — the [`kv::KeyValueStore`] trait with in-memory and
//!   sled-backed implementations
//! - [`wallet_store`] — the [`wallet_store::WalletStore`] persistence
//!   layer: store, load, password check, remove, and index listing

pub mod kv;
pub mod wallet_store;

pub use kv::{KeyValueStore, MemoryStore, SledStore};
pub use wallet_store::{WalletStore, DEFAULT_TAG};
