//! Keystore document: JSON codec plus the seal/open pipeline
//!
//! `seal` draws a fresh salt and IV, stretches the password with scrypt at
//! standard cost, encrypts the key, tags the ciphertext, and assembles a
//! version-3 document. `open` reverses it, verifying the tag before any
//! plaintext exists. Neither path persists anything; both are all-or-nothing.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::error::{KeystoreError, Result};
use crate::kdf::{Kdf, ScryptCost};
use crate::key::{AddressDeriver, PrivateKey};
use crate::{cipher, entropy, mac};
use crate::{CIPHER_AES_128_CTR, COIN_TYPE, IV_SIZE, KEYSTORE_VERSION, KEY_SIZE};

/// A sealed keystore document.
///
/// Immutable value: created whole by [`Keystore::seal`] or decoded whole by
/// [`Keystore::from_json`]; never partially constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keystore {
    /// Document version (always 3)
    pub version: u32,
    /// Fresh UUID v4 per seal
    pub id: String,
    /// Account address, stored opaquely (`hx…`)
    pub address: String,
    /// Target network coin tag (always "icx")
    #[serde(rename = "coinType")]
    pub coin_type: String,
    /// Encrypted key material and its parameters
    pub crypto: Crypto,
}

/// The `crypto` sub-document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crypto {
    /// Hex-encoded ciphertext, same length as the plaintext key
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// Cipher identifier (always "aes-128-ctr")
    pub cipher: String,
    /// KDF tag and parameters, serialized as the sibling `kdf`/`kdfparams`
    /// fields
    #[serde(flatten)]
    pub kdf: Kdf,
    /// Hex-encoded SHA3-256 integrity tag
    pub mac: String,
}

/// AES-128-CTR cipher parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherParams {
    /// Hex-encoded 16-byte initialization vector
    pub iv: String,
}

impl Keystore {
    /// Seal `key` under `password` with the standard scrypt cost
    /// (n=16384, r=8, p=1).
    pub fn seal(
        key: &PrivateKey,
        password: &SecretString,
        deriver: &dyn AddressDeriver,
    ) -> Result<Self> {
        Self::seal_with_cost(key, password, deriver, &ScryptCost::default())
    }

    /// Seal with a caller-chosen scrypt cost.
    ///
    /// Lighter costs weaken brute-force resistance; intended for tests and
    /// policy overrides.
    pub fn seal_with_cost(
        key: &PrivateKey,
        password: &SecretString,
        deriver: &dyn AddressDeriver,
        cost: &ScryptCost,
    ) -> Result<Self> {
        let salt = entropy::random_salt()?;
        let iv = entropy::random_iv()?;

        let kdf = Kdf::scrypt(&salt, cost);
        debug!(kdf = kdf.tag(), dklen = kdf.dklen(), "sealing private key");

        let derived = kdf.derive(password)?;
        let ciphertext = cipher::encrypt(derived.enc_key(), &iv, key.as_bytes());
        let tag = mac::compute_mac(derived.mac_key(), &ciphertext);
        let address = deriver.derive_address(key);

        Ok(Self {
            version: KEYSTORE_VERSION,
            id: Uuid::new_v4().to_string(),
            address,
            coin_type: COIN_TYPE.to_string(),
            crypto: Crypto {
                ciphertext: hex::encode(ciphertext),
                cipherparams: CipherParams {
                    iv: hex::encode(iv),
                },
                cipher: CIPHER_AES_128_CTR.to_string(),
                kdf,
                mac: hex::encode(tag),
            },
        })
    }

    /// Recover the private key sealed in this document.
    ///
    /// Re-derives key material from the stored parameters, verifies the
    /// integrity tag in constant time, and only then decrypts. A wrong
    /// password and a tampered document are indistinguishable here; both
    /// surface as [`KeystoreError::IntegrityFailure`].
    pub fn open(&self, password: &SecretString) -> Result<PrivateKey> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::MalformedKeystore(format!(
                "unsupported keystore version: {}",
                self.version
            )));
        }
        if self.crypto.cipher != CIPHER_AES_128_CTR {
            return Err(KeystoreError::MalformedKeystore(format!(
                "unsupported cipher: {}",
                self.crypto.cipher
            )));
        }

        let ciphertext = decode_hex_field(&self.crypto.ciphertext, "ciphertext")?;
        if ciphertext.len() != KEY_SIZE {
            return Err(KeystoreError::MalformedKeystore(format!(
                "ciphertext must be {} bytes, got {}",
                KEY_SIZE,
                ciphertext.len()
            )));
        }

        let iv_bytes = decode_hex_field(&self.crypto.cipherparams.iv, "iv")?;
        let iv: [u8; IV_SIZE] = iv_bytes.as_slice().try_into().map_err(|_| {
            KeystoreError::MalformedKeystore(format!(
                "iv must be {} bytes, got {}",
                IV_SIZE,
                iv_bytes.len()
            ))
        })?;

        let stored_mac = decode_hex_field(&self.crypto.mac, "mac")?;

        debug!(kdf = self.crypto.kdf.tag(), "opening keystore");
        let derived = self.crypto.kdf.derive(password)?;

        if !mac::verify_mac(&stored_mac, derived.mac_key(), &ciphertext) {
            return Err(KeystoreError::IntegrityFailure);
        }

        let mut plaintext = cipher::decrypt(derived.enc_key(), &iv, &ciphertext);
        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(&plaintext);
        plaintext.zeroize();

        Ok(PrivateKey::from_bytes(key_bytes))
    }

    /// Decode a keystore document from JSON.
    ///
    /// The `crypto.kdf` tag is inspected first so an unknown algorithm reports
    /// as such instead of a generic schema error; all structural validation
    /// happens here, before any key derivation. Unknown extra fields are
    /// ignored; missing required fields are fatal.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| KeystoreError::MalformedKeystore(format!("invalid json: {e}")))?;

        if let Some(tag) = value.pointer("/crypto/kdf").and_then(|v| v.as_str()) {
            if tag != "scrypt" && tag != "pbkdf2" {
                return Err(KeystoreError::UnsupportedKdf(tag.to_string()));
            }
        }

        serde_json::from_value(value)
            .map_err(|e| KeystoreError::MalformedKeystore(e.to_string()))
    }

    /// Encode the document as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| KeystoreError::MalformedKeystore(format!("serialization: {e}")))
    }

    /// Encode the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KeystoreError::MalformedKeystore(format!("serialization: {e}")))
    }
}

fn decode_hex_field(hex_str: &str, field: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str)
        .map_err(|e| KeystoreError::MalformedKeystore(format!("invalid {field} hex: {e}")))
}
