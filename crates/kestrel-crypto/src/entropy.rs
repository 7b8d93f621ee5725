//! Secure random byte generation.
//!
//! Entropy is modeled as an injectable function rather than a call-site
//! branch so that production code uses the OS CSPRNG while tests supply
//! deterministic byte vectors. Consumers take any
//! `Fn(usize) -> Result<Vec<u8>>`, so a test source may capture and
//! replay a recorded vector. All failures surface as
//! [`KestrelError::EntropyUnavailable`].

use kestrel_types::{KestrelError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Generates `byte_count` random bytes from the OS-level CSPRNG.
///
/// # Errors
///
/// Returns [`KestrelError::EntropyUnavailable`] if the operating system
/// random source cannot be read.
pub fn generate_entropy(byte_count: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; byte_count];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| KestrelError::EntropyUnavailable {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_byte_count() -> Result<()> {
        let bytes = generate_entropy(32)?;
        assert_eq!(bytes.len(), 32);
        Ok(())
    }

    #[test]
    fn successive_calls_differ() -> Result<()> {
        // 32 bytes colliding by chance is beyond astronomically unlikely.
        let a = generate_entropy(32)?;
        let b = generate_entropy(32)?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn zero_byte_request_is_empty() -> Result<()> {
        let bytes = generate_entropy(0)?;
        assert!(bytes.is_empty());
        Ok(())
    }
}
