//! Canonical-JSON ECDSA signing over secp256k1.
//!
//! Transactions are signed over their canonical JSON representation so
//! that semantically identical objects produce byte-identical
//! signatures regardless of original key order:
//!
//! 1. **Canonicalization** — object keys sorted bytewise at every
//!    nesting level, arrays in source order, no incidental whitespace.
//! 2. **Digest** — SHA-256 of the canonical text.
//! 3. **Sign** — ECDSA with the per-signature nonce derived
//!    deterministically from the key and digest (RFC 6979), never from
//!    fresh randomness.
//! 4. **Normalize** — low-S form: if `s` exceeds half the curve order
//!    it is replaced by `order - s`, as the consensus protocol requires
//!    canonical signatures.
//!
//! Output is the fixed 64-byte big-endian `r || s` concatenation;
//! [`sign_base64`] wraps it for transport.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use kestrel_types::{KestrelError, PrivateKey, PublicKey, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Byte length of a serialized `r || s` signature.
pub const SIGNATURE_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Canonical JSON
// ---------------------------------------------------------------------------

/// Serializes a JSON value to its canonical text form.
///
/// The total order on object keys is bytewise comparison of their
/// UTF-8 encodings; numbers and strings render exactly as `serde_json`
/// renders them in compact mode. This is a standalone pure function —
/// it does not rely on any serializer's default key ordering.
pub fn canonical_json(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&escape_string(s)?),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&escape_string(key)?);
                out.push(':');
                // Key came from the map, so the lookup cannot miss.
                if let Some(child) = map.get(key.as_str()) {
                    write_canonical(child, out)?;
                }
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Renders a string with standard JSON escaping, including the quotes.
fn escape_string(s: &str) -> Result<String> {
    serde_json::to_string(s).map_err(|e| KestrelError::Crypto {
        reason: format!("string escaping failed: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Signs a transaction object, returning the 64-byte `r || s` signature.
///
/// Deterministic: re-signing the same object with the same key always
/// reproduces the exact same bytes.
///
/// # Errors
///
/// Returns [`KestrelError::InvalidPrivateKey`] if the key is not a
/// valid nonzero scalar.
pub fn sign(transaction: &Value, private_key: &PrivateKey) -> Result<[u8; SIGNATURE_LEN]> {
    let signing_key = SigningKey::from_slice(private_key.as_bytes())
        .map_err(|_| KestrelError::InvalidPrivateKey)?;

    let canonical = canonical_json(transaction)?;
    let digest = Sha256::digest(canonical.as_bytes());

    // RFC 6979 deterministic nonce, keyed on private key and digest.
    let signature: Signature =
        signing_key
            .sign_prehash(digest.as_slice())
            .map_err(|e| KestrelError::Crypto {
                reason: format!("ecdsa signing failed: {e}"),
            })?;

    // Low-S normalization: s > order/2 becomes order - s.
    let signature = signature.normalize_s().unwrap_or(signature);

    let mut out = [0u8; SIGNATURE_LEN];
    out.copy_from_slice(&signature.to_bytes());
    Ok(out)
}

/// Signs a transaction and base64-encodes the 64-byte signature for
/// embedding in a transaction envelope.
pub fn sign_base64(transaction: &Value, private_key: &PrivateKey) -> Result<String> {
    let signature = sign(transaction, private_key)?;
    Ok(BASE64.encode(signature))
}

/// Verifies a 64-byte `r || s` signature over a transaction object.
///
/// Recomputes the canonical digest and checks the signature against
/// the compressed public key.
///
/// # Errors
///
/// Returns [`KestrelError::Crypto`] for an invalid public key,
/// malformed signature, or verification failure.
pub fn verify(
    transaction: &Value,
    signature: &[u8; SIGNATURE_LEN],
    public_key: &PublicKey,
) -> Result<()> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key.as_bytes()).map_err(|e| KestrelError::Crypto {
            reason: format!("invalid public key: {e}"),
        })?;
    let signature =
        Signature::from_slice(signature).map_err(|e| KestrelError::Crypto {
            reason: format!("malformed signature: {e}"),
        })?;

    let canonical = canonical_json(transaction)?;
    let digest = Sha256::digest(canonical.as_bytes());

    verifying_key
        .verify_prehash(digest.as_slice(), &signature)
        .map_err(|e| KestrelError::Crypto {
            reason: format!("signature verification failed: {e}"),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
