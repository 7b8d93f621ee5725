//! Password-based encryption for wallets at rest.
//!
//! A 256-bit key is stretched from the password and a fresh random
//! 128-bit salt via PBKDF2-HMAC-SHA256 (100 iterations), then the
//! plaintext is encrypted with AES-256-CBC under a fresh random
//! 128-bit IV using PKCS#7 padding.
//!
//! # At-rest layout
//!
//! ```text
//! hex(salt) || hex(iv) || hex(ciphertext)
//!  32 chars    32 chars   variable
//! ```
//!
//! A wrong key yields effectively random plaintext, so padding and
//! parse failures during decryption all surface as
//! [`KestrelError::IncorrectPassword`] — corrupted ciphertext is
//! deliberately indistinguishable from a wrong password.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use kestrel_types::{KestrelError, Result};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::entropy::generate_entropy;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// PBKDF2 iteration count for the wallet cipher.
const PBKDF2_ROUNDS: u32 = 100;

/// Byte length of the random salt (rendered as 32 hex chars).
const SALT_LEN: usize = 16;

/// Byte length of the random IV (rendered as 32 hex chars).
const IV_LEN: usize = 16;

/// Byte length of the derived AES-256 key.
const KEY_LEN: usize = 32;

/// Hex width of the salt and IV prefixes combined.
const PREFIX_CHARS: usize = (SALT_LEN + IV_LEN) * 2;

/// Stretches a password and salt into a 256-bit cipher key.
fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    key
}

/// Encrypts plaintext under a password, returning the at-rest text.
///
/// Salt and IV are drawn fresh from the OS entropy source on every
/// call, so encrypting the same plaintext twice yields different
/// outputs.
///
/// # Errors
///
/// Returns [`KestrelError::EntropyUnavailable`] if salt or IV bytes
/// cannot be generated.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<String> {
    let salt = generate_entropy(SALT_LEN)?;
    let iv = generate_entropy(IV_LEN)?;
    encrypt_with(plaintext, password, &salt, &iv)
}

/// Encryption core with explicit salt and IV.
fn encrypt_with(plaintext: &[u8], password: &str, salt: &[u8], iv: &[u8]) -> Result<String> {
    let mut key = derive_key(password, salt);

    let cipher = Aes256CbcEnc::new_from_slices(&key, iv).map_err(|e| KestrelError::Crypto {
        reason: format!("cipher init failed: {e}"),
    })?;
    key.zeroize();

    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = String::with_capacity(PREFIX_CHARS + ciphertext.len() * 2);
    out.push_str(&hex::encode(salt));
    out.push_str(&hex::encode(iv));
    out.push_str(&hex::encode(ciphertext));
    Ok(out)
}

/// Decrypts at-rest text under a password.
///
/// Splits the fixed-width salt and IV prefixes, re-derives the key
/// from the supplied password and stored salt, and strips the PKCS#7
/// padding.
///
/// # Errors
///
/// Returns [`KestrelError::IncorrectPassword`] for any malformed
/// layout, bad hex, or padding failure — a wrong password and
/// corrupted ciphertext are not distinguishable by design.
pub fn decrypt(stored: &str, password: &str) -> Result<Vec<u8>> {
    // Hex text is ASCII; a non-ASCII byte means the envelope is
    // corrupted, and would also break the fixed-index slicing below.
    if stored.len() <= PREFIX_CHARS || !stored.is_ascii() {
        return Err(KestrelError::IncorrectPassword);
    }

    let salt = hex::decode(&stored[..SALT_LEN * 2]).map_err(|_| KestrelError::IncorrectPassword)?;
    let iv = hex::decode(&stored[SALT_LEN * 2..PREFIX_CHARS])
        .map_err(|_| KestrelError::IncorrectPassword)?;
    let ciphertext =
        hex::decode(&stored[PREFIX_CHARS..]).map_err(|_| KestrelError::IncorrectPassword)?;

    let mut key = derive_key(password, &salt);
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv).map_err(|e| KestrelError::Crypto {
        reason: format!("cipher init failed: {e}"),
    })?;
    key.zeroize();

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| KestrelError::IncorrectPassword)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
