//! Entropy draws for salt and IV generation
//!
//! All randomness comes from the operating system CSPRNG (`OsRng`), which is
//! safe to call from any number of threads. A failed draw is reported as a
//! typed error rather than a panic, since sealing must be all-or-nothing.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{KeystoreError, Result};
use crate::{IV_SIZE, SALT_SIZE};

/// Draw `N` random bytes from the OS CSPRNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| KeystoreError::RandomSourceFailure(e.to_string()))?;
    Ok(buf)
}

/// Draw a fresh 32-byte KDF salt.
pub fn random_salt() -> Result<[u8; SALT_SIZE]> {
    random_bytes::<SALT_SIZE>()
}

/// Draw a fresh 16-byte AES-CTR initialization vector.
pub fn random_iv() -> Result<[u8; IV_SIZE]> {
    random_bytes::<IV_SIZE>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_salt_length_and_uniqueness() {
        let s1 = random_salt().unwrap();
        let s2 = random_salt().unwrap();

        assert_eq!(s1.len(), SALT_SIZE);
        // Salts should differ (extremely high probability)
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_random_iv_length_and_uniqueness() {
        let iv1 = random_iv().unwrap();
        let iv2 = random_iv().unwrap();

        assert_eq!(iv1.len(), IV_SIZE);
        assert_ne!(iv1, iv2);
    }
}
