//! AES-128-CTR stream cipher
//!
//! CTR mode turns AES into a keystream generator XORed over the data: no
//! padding, output length equals input length, and decryption is the same
//! keystream application. The mode cannot detect corruption by itself, so
//! callers verify the MAC before trusting decrypted bytes.

use aes::cipher::{KeyIvInit, StreamCipher};

use crate::{ENC_KEY_SIZE, IV_SIZE};

/// AES-128-CTR with a 128-bit big-endian counter
type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

/// Encrypt `plaintext` under `(key, iv)`.
pub fn encrypt(key: &[u8; ENC_KEY_SIZE], iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Vec<u8> {
    apply_keystream(key, iv, plaintext)
}

/// Decrypt `ciphertext` under `(key, iv)`.
///
/// Pure function of its inputs; garbage in yields garbage out with no error
/// signal.
pub fn decrypt(key: &[u8; ENC_KEY_SIZE], iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> Vec<u8> {
    apply_keystream(key, iv, ciphertext)
}

fn apply_keystream(key: &[u8; ENC_KEY_SIZE], iv: &[u8; IV_SIZE], data: &[u8]) -> Vec<u8> {
    let mut cipher = Aes128Ctr::new(key.into(), iv.into());
    let mut out = data.to_vec();
    cipher.apply_keystream(&mut out);
    out
}
