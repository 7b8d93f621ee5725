//! End-to-end store tests over real derived wallets and the sled
//! backend, exercising the full derive -> encrypt -> persist -> load
//! pipeline.

use kestrel_crypto::{derive, mnemonic};
use kestrel_store::{SledStore, WalletStore};
use kestrel_types::{KestrelError, Result, Wallet};

const PASSWORD: &str = "correct horse battery staple";

fn derived_wallet(fill: u8) -> Result<Wallet> {
    let phrase = mnemonic::entropy_to_mnemonic(&[fill; 32])?;
    derive::wallet_from_mnemonic(&phrase)
}

#[test]
fn sled_store_roundtrip_with_derived_wallet() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| KestrelError::Storage {
        reason: e.to_string(),
    })?;
    let store = WalletStore::new(SledStore::open(dir.path())?);

    let wallet = derived_wallet(0x00)?;
    store.store(&wallet, "primary", PASSWORD)?;

    let loaded = store.load(&wallet.address, PASSWORD)?;
    assert_eq!(loaded, wallet);

    let index = store.list_index()?;
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].name, "primary");
    assert_eq!(index[0].address, wallet.address);
    Ok(())
}

#[test]
fn sled_store_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| KestrelError::Storage {
        reason: e.to_string(),
    })?;
    let wallet = derived_wallet(0x5A)?;

    {
        let store = WalletStore::new(SledStore::open(dir.path())?);
        store.store(&wallet, "persistent", PASSWORD)?;
    }

    let store = WalletStore::new(SledStore::open(dir.path())?);
    let loaded = store.load(&wallet.address, PASSWORD)?;
    assert_eq!(loaded, wallet);
    assert_eq!(store.list_index()?.len(), 1);
    Ok(())
}

#[test]
fn wrong_password_rejected_across_operations() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| KestrelError::Storage {
        reason: e.to_string(),
    })?;
    let store = WalletStore::new(SledStore::open(dir.path())?);

    let wallet = derived_wallet(0x11)?;
    store.store(&wallet, "guarded", PASSWORD)?;

    for result in [
        store.load(&wallet.address, "bad").map(|_| ()),
        store.test_password(&wallet.address, "bad"),
        store.remove(&wallet.address, "bad"),
    ] {
        assert!(matches!(result, Err(KestrelError::IncorrectPassword)));
    }

    // Wallet must still be intact after all the failed attempts.
    assert_eq!(store.load(&wallet.address, PASSWORD)?, wallet);
    Ok(())
}

#[test]
fn remove_then_store_again_succeeds() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| KestrelError::Storage {
        reason: e.to_string(),
    })?;
    let store = WalletStore::new(SledStore::open(dir.path())?);

    let wallet = derived_wallet(0x22)?;
    store.store(&wallet, "recycled", PASSWORD)?;
    store.remove(&wallet.address, PASSWORD)?;

    // Both the address and the name are free again.
    store.store(&wallet, "recycled", PASSWORD)?;
    assert_eq!(store.list_index()?.len(), 1);
    Ok(())
}

#[test]
fn distinct_wallets_coexist() -> Result<()> {
    let dir = tempfile::tempdir().map_err(|e| KestrelError::Storage {
        reason: e.to_string(),
    })?;
    let store = WalletStore::new(SledStore::open(dir.path())?);

    let a = derived_wallet(0x33)?;
    let b = derived_wallet(0x44)?;
    assert_ne!(a.address, b.address);

    store.store(&a, "first", "password-a")?;
    store.store(&b, "second", "password-b")?;

    // Each wallet opens only with its own password.
    assert_eq!(store.load(&a.address, "password-a")?, a);
    assert!(matches!(
        store.load(&a.address, "password-b"),
        Err(KestrelError::IncorrectPassword)
    ));
    assert_eq!(store.load(&b.address, "password-b")?, b);

    let index = store.list_index()?;
    assert_eq!(index.len(), 2);
    Ok(())
}
