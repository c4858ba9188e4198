//! Private key material and the address collaborator seam

use zeroize::Zeroize;

use crate::KEY_SIZE;

/// A 32-byte private signing key.
///
/// Zeroized on drop to prevent secrets lingering in memory. This crate never
/// serializes or logs the key; once `open` hands it out, the caller owns it.
#[derive(Clone)]
pub struct PrivateKey {
    bytes: [u8; KEY_SIZE],
}

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Turns a private key into the account address string (`hx…`).
///
/// Supplied by the caller's secp256k1/SHA3 stack. The keystore stores the
/// returned string opaquely and never validates it against the recovered key;
/// callers that need that guarantee must recompute and compare after `open`.
/// Implementations should validate the key against their curve before sealing.
pub trait AddressDeriver {
    fn derive_address(&self, key: &PrivateKey) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key_material() {
        let key = PrivateKey::from_bytes([0x7f; KEY_SIZE]);
        let out = format!("{:?}", key);

        assert!(out.contains("REDACTED"));
        assert!(!out.contains("7f"));
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let key = PrivateKey::from_bytes([0x11; KEY_SIZE]);
        assert_eq!(key.as_bytes(), &[0x11; KEY_SIZE]);
    }
}
