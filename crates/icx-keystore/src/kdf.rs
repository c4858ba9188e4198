//! Key derivation: password → derived key material
//!
//! Two interchangeable variants, scrypt and PBKDF2-HMAC-SHA256, both
//! deterministic and intentionally expensive. The variant and its parameters
//! are a single sum type carrying exactly the fields its tag requires, so a
//! document cannot claim `kdf: "scrypt"` while shipping pbkdf2 fields.

use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{KeystoreError, Result};
use crate::{ENC_KEY_SIZE, MIN_DKLEN};

/// Standard scrypt cost at seal time
pub const SCRYPT_N: u32 = 16384; // 2^14
pub const SCRYPT_R: u32 = 8;
pub const SCRYPT_P: u32 = 1;

/// Derived key length at seal time
pub const DKLEN: u32 = 32;

/// PRF identifier accepted for the pbkdf2 variant
pub const PRF_HMAC_SHA256: &str = "hmac-sha256";

/// KDF variant and parameters.
///
/// Serializes as the document's sibling fields `"kdf"` (tag) and
/// `"kdfparams"` (payload); flattened into the crypto sub-document by the
/// codec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kdf", content = "kdfparams", rename_all = "lowercase")]
pub enum Kdf {
    Pbkdf2(Pbkdf2Params),
    Scrypt(ScryptParams),
}

/// PBKDF2-HMAC-SHA256 parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pbkdf2Params {
    /// Derived key length in bytes
    pub dklen: u32,
    /// Salt as hex string
    pub salt: String,
    /// Iteration count
    pub c: u32,
    /// Pseudo-random function identifier ("hmac-sha256")
    pub prf: String,
}

/// scrypt parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScryptParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// Salt as hex string
    pub salt: String,
    /// CPU/memory cost (must be a power of two greater than 1)
    pub n: u32,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
}

/// scrypt cost knobs for sealing, without the per-document salt.
///
/// `Default` is the standard wallet cost; tests and policy overrides may use
/// lighter values.
#[derive(Debug, Clone)]
pub struct ScryptCost {
    pub n: u32,
    pub r: u32,
    pub p: u32,
}

impl Default for ScryptCost {
    fn default() -> Self {
        Self {
            n: SCRYPT_N,
            r: SCRYPT_R,
            p: SCRYPT_P,
        }
    }
}

/// Key material stretched from a password, already split into its two
/// independent slices: a 16-byte cipher key and the remaining MAC key.
/// Zeroized on drop.
pub struct DerivedKey {
    enc: [u8; ENC_KEY_SIZE],
    mac: Vec<u8>,
}

impl DerivedKey {
    fn new(mut bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.len() >= MIN_DKLEN);
        let mut enc = [0u8; ENC_KEY_SIZE];
        enc.copy_from_slice(&bytes[..ENC_KEY_SIZE]);
        let mac = bytes[ENC_KEY_SIZE..].to_vec();
        bytes.zeroize();
        Self { enc, mac }
    }

    /// The AES-128 encryption key.
    pub fn enc_key(&self) -> &[u8; ENC_KEY_SIZE] {
        &self.enc
    }

    /// The MAC key (everything beyond the encryption key, at least 16 bytes).
    pub fn mac_key(&self) -> &[u8] {
        &self.mac
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.enc.zeroize();
        self.mac.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl Kdf {
    /// Build a scrypt variant from a raw salt and a cost setting.
    pub fn scrypt(salt: &[u8], cost: &ScryptCost) -> Self {
        Kdf::Scrypt(ScryptParams {
            dklen: DKLEN,
            salt: hex::encode(salt),
            n: cost.n,
            r: cost.r,
            p: cost.p,
        })
    }

    /// The document tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Kdf::Pbkdf2(_) => "pbkdf2",
            Kdf::Scrypt(_) => "scrypt",
        }
    }

    /// Derived key length in bytes.
    pub fn dklen(&self) -> usize {
        match self {
            Kdf::Pbkdf2(p) => p.dklen as usize,
            Kdf::Scrypt(p) => p.dklen as usize,
        }
    }

    /// Validate cost parameters without deriving anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            Kdf::Pbkdf2(p) => {
                if p.c == 0 {
                    return Err(KeystoreError::InvalidParameter(
                        "pbkdf2 iteration count must be positive".to_string(),
                    ));
                }
                if p.prf != PRF_HMAC_SHA256 {
                    return Err(KeystoreError::InvalidParameter(format!(
                        "unsupported prf: {}",
                        p.prf
                    )));
                }
                validate_dklen(p.dklen)
            }
            Kdf::Scrypt(p) => {
                if p.n < 2 || !p.n.is_power_of_two() {
                    return Err(KeystoreError::InvalidParameter(format!(
                        "scrypt n must be a power of two greater than 1, got {}",
                        p.n
                    )));
                }
                if p.r == 0 || p.p == 0 {
                    return Err(KeystoreError::InvalidParameter(
                        "scrypt r and p must be positive".to_string(),
                    ));
                }
                validate_dklen(p.dklen)?;
                // Delegates the r*p memory/block limits to the scrypt crate.
                scrypt_params(p)?;
                Ok(())
            }
        }
    }

    /// Stretch `password` into `dklen` bytes of key material.
    ///
    /// Deterministic: identical inputs always yield identical output.
    /// Parameter validation happens first; no derivation work is attempted
    /// for invalid costs.
    pub fn derive(&self, password: &SecretString) -> Result<DerivedKey> {
        self.validate()?;

        match self {
            Kdf::Pbkdf2(p) => {
                let salt = decode_salt(&p.salt)?;
                let mut out = vec![0u8; p.dklen as usize];
                pbkdf2_hmac::<Sha256>(
                    password.expose_secret().as_bytes(),
                    &salt,
                    p.c,
                    &mut out,
                );
                Ok(DerivedKey::new(out))
            }
            Kdf::Scrypt(p) => {
                let salt = decode_salt(&p.salt)?;
                let params = scrypt_params(p)?;
                let mut out = vec![0u8; p.dklen as usize];
                scrypt::scrypt(
                    password.expose_secret().as_bytes(),
                    &salt,
                    &params,
                    &mut out,
                )
                .map_err(|e| KeystoreError::InvalidParameter(e.to_string()))?;
                Ok(DerivedKey::new(out))
            }
        }
    }
}

fn validate_dklen(dklen: u32) -> Result<()> {
    if (dklen as usize) < MIN_DKLEN {
        return Err(KeystoreError::InvalidParameter(format!(
            "dklen must be at least {} (16-byte cipher key + 16-byte mac key), got {}",
            MIN_DKLEN, dklen
        )));
    }
    Ok(())
}

fn decode_salt(salt_hex: &str) -> Result<Vec<u8>> {
    hex::decode(salt_hex)
        .map_err(|e| KeystoreError::MalformedKeystore(format!("invalid salt hex: {e}")))
}

fn scrypt_params(p: &ScryptParams) -> Result<scrypt::Params> {
    // n is a validated power of two, so trailing_zeros is exactly log2(n).
    let log_n = p.n.trailing_zeros() as u8;
    scrypt::Params::new(log_n, p.r, p.p, p.dklen as usize)
        .map_err(|e| KeystoreError::InvalidParameter(e.to_string()))
}
