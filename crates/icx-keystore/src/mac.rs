//! Integrity tag over the ciphertext
//!
//! The tag is SHA3-256 over the MAC-key slice of the derived key followed by
//! the ciphertext. Verification is constant-time so a comparison cannot leak
//! how many leading bytes matched.

use sha3::{Digest, Sha3_256};
use subtle::ConstantTimeEq;

/// Compute the integrity tag: SHA3-256(mac_key || ciphertext).
pub fn compute_mac(mac_key: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(mac_key);
    hasher.update(ciphertext);
    hasher.finalize().into()
}

/// Recompute the tag and compare against `expected` in constant time.
///
/// A length mismatch compares unequal. Callers must fail closed on `false`:
/// no decrypted plaintext may reach the caller.
pub fn verify_mac(expected: &[u8], mac_key: &[u8], ciphertext: &[u8]) -> bool {
    let computed = compute_mac(mac_key, ciphertext);
    bool::from(computed.ct_eq(expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_deterministic() {
        let mac_key = [0x11; 16];
        let ciphertext = [0x22; 32];

        assert_eq!(
            compute_mac(&mac_key, &ciphertext),
            compute_mac(&mac_key, &ciphertext)
        );
    }

    #[test]
    fn test_verify_accepts_valid_tag() {
        let mac_key = [0x11; 16];
        let ciphertext = b"ciphertext-bytes";

        let tag = compute_mac(&mac_key, ciphertext);
        assert!(verify_mac(&tag, &mac_key, ciphertext));
    }

    #[test]
    fn test_verify_rejects_wrong_key_or_data() {
        let mac_key = [0x11; 16];
        let ciphertext = b"ciphertext-bytes";
        let tag = compute_mac(&mac_key, ciphertext);

        assert!(!verify_mac(&tag, &[0x12; 16], ciphertext));
        assert!(!verify_mac(&tag, &mac_key, b"other-bytes"));
    }

    #[test]
    fn test_verify_rejects_truncated_tag() {
        let mac_key = [0x11; 16];
        let ciphertext = b"ciphertext-bytes";
        let tag = compute_mac(&mac_key, ciphertext);

        assert!(!verify_mac(&tag[..16], &mac_key, ciphertext));
    }

    #[test]
    fn test_single_bit_flip_changes_tag() {
        let mac_key = [0x11; 16];
        let mut ciphertext = vec![0x22; 32];

        let tag = compute_mac(&mac_key, &ciphertext);
        ciphertext[0] ^= 0x01;

        assert!(!verify_mac(&tag, &mac_key, &ciphertext));
    }
}
