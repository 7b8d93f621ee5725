//! Bech32 address encoding for compressed public keys.
//!
//! An address is `bech32("cosmos", RIPEMD160(SHA256(pubkey)))`: the
//! 33-byte compressed point is hashed down to a 20-byte identifier,
//! repacked into 5-bit groups, and suffixed with the six-character
//! BIP-173 polymod checksum. The encoding is validated against known
//! vectors rather than re-derived — the bit-packing and checksum
//! constants are the easiest place to hide an off-by-one.

use bech32::{FromBase32, ToBase32, Variant};
use kestrel_types::{KestrelError, PublicKey, Result};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Human-readable prefix for Kestrel addresses.
const BECH32_HRP: &str = "cosmos";

/// Byte length of the hashed address identifier.
const IDENTIFIER_LEN: usize = 20;

/// Encodes a compressed public key as a checksummed bech32 address.
///
/// Pure function of its input bytes: the key is hashed with SHA-256,
/// the digest hashed again with RIPEMD-160, and the resulting 20-byte
/// identifier bech32-encoded under the `cosmos` prefix. Output is
/// always lowercase.
pub fn encode_address(public_key: &PublicKey) -> Result<String> {
    let sha = Sha256::digest(public_key.as_bytes());
    let identifier = Ripemd160::digest(sha);

    bech32::encode(BECH32_HRP, identifier.to_base32(), Variant::Bech32).map_err(|e| {
        KestrelError::Crypto {
            reason: format!("bech32 encoding failed: {e}"),
        }
    })
}

/// Decodes a bech32 address back to its 20-byte identifier.
///
/// Verifies the `cosmos` prefix and the polymod checksum.
///
/// # Errors
///
/// Returns [`KestrelError::InvalidAddress`] for a malformed encoding,
/// wrong prefix, bad checksum, or wrong payload length.
pub fn decode_address(address: &str) -> Result<[u8; IDENTIFIER_LEN]> {
    let (hrp, data, variant) =
        bech32::decode(address).map_err(|e| KestrelError::InvalidAddress {
            reason: format!("bech32 decoding failed: {e}"),
        })?;

    if hrp != BECH32_HRP {
        return Err(KestrelError::InvalidAddress {
            reason: format!("expected prefix '{BECH32_HRP}', got '{hrp}'"),
        });
    }
    if variant != Variant::Bech32 {
        return Err(KestrelError::InvalidAddress {
            reason: "expected bech32 checksum variant, got bech32m".into(),
        });
    }

    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| KestrelError::InvalidAddress {
        reason: format!("base32 repacking failed: {e}"),
    })?;
    if bytes.len() != IDENTIFIER_LEN {
        return Err(KestrelError::InvalidAddress {
            reason: format!("expected {IDENTIFIER_LEN}-byte payload, got {}", bytes.len()),
        });
    }

    let mut out = [0u8; IDENTIFIER_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_key() -> PublicKey {
        let bytes =
            hex::decode("52fdfc072182654f163f5f0f9a621d729566c74d10037c4d7bbb0407d1e2c64981")
                .expect("valid hex");
        let mut arr = [0u8; 33];
        arr.copy_from_slice(&bytes);
        PublicKey::new(arr)
    }

    /// Known (publicKey, address) vector — must match exactly.
    #[test]
    fn known_vector_matches() -> Result<()> {
        let address = encode_address(&vector_key())?;
        assert_eq!(address, "cosmos1v3z3242hq7xrms35gu722v4nt8uux8nvug5gye");
        Ok(())
    }

    #[test]
    fn encoding_is_pure() -> Result<()> {
        let key = vector_key();
        assert_eq!(encode_address(&key)?, encode_address(&key)?);
        Ok(())
    }

    #[test]
    fn output_is_single_case() -> Result<()> {
        let address = encode_address(&vector_key())?;
        assert_eq!(address, address.to_lowercase());
        Ok(())
    }

    #[test]
    fn decode_roundtrips_identifier() -> Result<()> {
        let key = vector_key();
        let address = encode_address(&key)?;
        let identifier = decode_address(&address)?;

        let expected = Ripemd160::digest(Sha256::digest(key.as_bytes()));
        assert_eq!(identifier.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn decode_rejects_wrong_prefix() {
        // Valid bech32 but wrong human-readable part.
        let result = decode_address("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert!(matches!(result, Err(KestrelError::InvalidAddress { .. })));
    }

    #[test]
    fn decode_rejects_corrupted_checksum() {
        let mut address = "cosmos1v3z3242hq7xrms35gu722v4nt8uux8nvug5gye".to_string();
        // Flip the last checksum character.
        address.pop();
        address.push('x');
        assert!(decode_address(&address).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_address("not an address").is_err());
    }
}
