//! The wallet persistence layer: encrypted entries plus a name index.
//!
//! Each wallet is stored under `"<tag>-<address>"` as a JSON
//! [`StoredWallet`] envelope whose `wallet` field is the at-rest
//! ciphertext (see [`kestrel_crypto::cipher`]). A single
//! `"<tag>-index"` key holds the ordered name/address index.
//!
//! The wallet entry and the index are two separate single-key writes;
//! the backing store offers no multi-key transaction, so a crash
//! between them can leave the two inconsistent. This is an accepted
//! limitation — the design assumes a single writer per logical user
//! session and no locking is implemented.

use kestrel_crypto::cipher;
use kestrel_types::{IndexEntry, KestrelError, Result, StoredWallet, Wallet};
use zeroize::Zeroize;

use crate::kv::KeyValueStore;

/// Default key prefix for wallet entries and the index.
pub const DEFAULT_TAG: &str = "cosmos-wallets";

/// Encrypted wallet store over a generic key-value backend.
pub struct WalletStore<S: KeyValueStore> {
    kv: S,
    tag: String,
}

impl<S: KeyValueStore> WalletStore<S> {
    /// Creates a store over `kv` with the default key tag.
    pub fn new(kv: S) -> Self {
        Self::with_tag(kv, DEFAULT_TAG)
    }

    /// Creates a store with a custom key tag, for callers that share a
    /// backend between unrelated namespaces.
    pub fn with_tag(kv: S, tag: &str) -> Self {
        Self {
            kv,
            tag: tag.to_string(),
        }
    }

    fn wallet_key(&self, address: &str) -> String {
        format!("{}-{}", self.tag, address)
    }

    fn index_key(&self) -> String {
        format!("{}-index", self.tag)
    }

    /// Encrypts and persists a wallet under `name`.
    ///
    /// # Errors
    ///
    /// - [`KestrelError::DuplicateAddress`] if an entry already exists
    ///   for `wallet.address`.
    /// - [`KestrelError::DuplicateName`] if `name` is already taken in
    ///   the index.
    pub fn store(&self, wallet: &Wallet, name: &str, password: &str) -> Result<()> {
        let key = self.wallet_key(&wallet.address);
        if self.kv.get(&key)?.is_some() {
            return Err(KestrelError::DuplicateAddress {
                address: wallet.address.clone(),
            });
        }

        let mut index = self.list_index()?;
        if index.iter().any(|entry| entry.name == name) {
            return Err(KestrelError::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut plaintext = serde_json::to_vec(wallet).map_err(|e| KestrelError::Storage {
            reason: format!("wallet serialization failed: {e}"),
        })?;
        let ciphertext = cipher::encrypt(&plaintext, password);
        plaintext.zeroize();

        let stored = StoredWallet {
            name: name.to_string(),
            address: wallet.address.clone(),
            wallet: ciphertext?,
        };
        let value = serde_json::to_string(&stored).map_err(|e| KestrelError::Storage {
            reason: format!("envelope serialization failed: {e}"),
        })?;

        // Two non-transactional writes: entry first, then the index.
        self.kv.set(&key, &value)?;

        index.push(IndexEntry {
            name: name.to_string(),
            address: wallet.address.clone(),
        });
        self.write_index(&index)?;

        tracing::info!(address = %wallet.address, name, "stored encrypted wallet");
        Ok(())
    }

    /// Loads and decrypts the wallet stored under `address`.
    ///
    /// # Errors
    ///
    /// - [`KestrelError::WalletNotFound`] if no entry exists.
    /// - [`KestrelError::IncorrectPassword`] if decryption output does
    ///   not parse as a wallet (wrong password or corrupted
    ///   ciphertext — intentionally indistinguishable).
    pub fn load(&self, address: &str, password: &str) -> Result<Wallet> {
        let stored = self.read_envelope(address)?;

        let mut plaintext = cipher::decrypt(&stored.wallet, password)?;
        let wallet: Wallet = match serde_json::from_slice(&plaintext) {
            Ok(wallet) => wallet,
            Err(_) => {
                plaintext.zeroize();
                return Err(KestrelError::IncorrectPassword);
            }
        };
        plaintext.zeroize();
        Ok(wallet)
    }

    /// Checks a password without retaining the decrypted wallet.
    ///
    /// Same decrypt-and-validate path as [`load`](Self::load); used to
    /// gate destructive operations.
    pub fn test_password(&self, address: &str, password: &str) -> Result<()> {
        self.load(address, password).map(|_| ())
    }

    /// Deletes the wallet stored under `address`.
    ///
    /// Verifies the password first, then removes the wallet entry and
    /// drops the matching index row (again two non-transactional
    /// writes).
    ///
    /// # Errors
    ///
    /// [`KestrelError::WalletNotFound`] or
    /// [`KestrelError::IncorrectPassword`] as for [`load`](Self::load).
    pub fn remove(&self, address: &str, password: &str) -> Result<()> {
        self.test_password(address, password)?;

        self.kv.remove(&self.wallet_key(address))?;

        let mut index = self.list_index()?;
        index.retain(|entry| entry.address != address);
        self.write_index(&index)?;

        tracing::info!(address, "removed wallet");
        Ok(())
    }

    /// Returns the current name/address index, in insertion order.
    pub fn list_index(&self) -> Result<Vec<IndexEntry>> {
        match self.kv.get(&self.index_key())? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| KestrelError::Storage {
                reason: format!("wallet index is corrupted: {e}"),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write_index(&self, index: &[IndexEntry]) -> Result<()> {
        let raw = serde_json::to_string(index).map_err(|e| KestrelError::Storage {
            reason: format!("index serialization failed: {e}"),
        })?;
        self.kv.set(&self.index_key(), &raw)
    }

    fn read_envelope(&self, address: &str) -> Result<StoredWallet> {
        let raw = self
            .kv
            .get(&self.wallet_key(address))?
            .ok_or_else(|| KestrelError::WalletNotFound {
                address: address.to_string(),
            })?;
        serde_json::from_str(&raw).map_err(|e| KestrelError::Storage {
            reason: format!("stored wallet envelope is corrupted: {e}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
