//! icx-keystore: password-protected storage for ICX signing keys
//!
//! Seals a 32-byte private key into a portable version-3 keystore document
//! and recovers it given the correct password. The surrounding wallet client
//! (request building, transport, address math) lives elsewhere; this crate
//! only ever sees byte buffers and JSON documents.
//!
//! Pipeline: password → KDF (scrypt or PBKDF2-HMAC-SHA256) → derived key,
//! split into a 16-byte AES-128-CTR encryption key and a MAC key → SHA3-256
//! integrity tag over the ciphertext. Decryption happens only after the tag
//! verifies.
//!
//! Document format:
//! ```json
//! {
//!   "version": 3,
//!   "id": "uuid-v4",
//!   "address": "hx...",
//!   "coinType": "icx",
//!   "crypto": {
//!     "cipher": "aes-128-ctr",
//!     "ciphertext": "hex",
//!     "cipherparams": { "iv": "hex" },
//!     "kdf": "scrypt",
//!     "kdfparams": { "dklen": 32, "salt": "hex", "n": 16384, "r": 8, "p": 1 },
//!     "mac": "hex"
//!   }
//! }
//! ```

pub mod cipher;
pub mod entropy;
pub mod error;
pub mod kdf;
pub mod key;
pub mod keystore;
pub mod mac;

pub use error::KeystoreError;
pub use kdf::{DerivedKey, Kdf, Pbkdf2Params, ScryptCost, ScryptParams};
pub use key::{AddressDeriver, PrivateKey};
pub use keystore::{CipherParams, Crypto, Keystore};
pub use mac::{compute_mac, verify_mac};

/// Size of a private key in bytes (secp256k1 scalar)
pub const KEY_SIZE: usize = 32;

/// Size of the AES-128 encryption key carved from the derived key
pub const ENC_KEY_SIZE: usize = 16;

/// Size of an AES-CTR initialization vector
pub const IV_SIZE: usize = 16;

/// Salt length generated at seal time
pub const SALT_SIZE: usize = 32;

/// Minimum derived key length: 16-byte encryption key + 16-byte MAC key
pub const MIN_DKLEN: usize = 32;

/// Keystore document version
pub const KEYSTORE_VERSION: u32 = 3;

/// Coin tag stored in every document
pub const COIN_TYPE: &str = "icx";

/// Cipher identifier stored in every document
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";
