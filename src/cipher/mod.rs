//! Cryptographic operations.
//!
//! Provides the encryption/decryption abstraction and its implementations.
//! Supports two backends: AES-256-CBC and a P-256 keyed AES-256-CFB stream.
//!
//! ## Backends
//!
//! - **aes**: AES-256 in CBC mode with PKCS#7 padding. Keyed by a caller
//!   supplied (or [`generate_key`] generated) 32-byte key.
//! - **ecdh**: carries a P-256 key pair and runs AES-256 in CFB mode, keyed
//!   by the private scalar's raw bytes. Length-preserving, no padding.
//!
//! Every ciphertext is framed as `IV(16) || payload` with a fresh random IV
//! per call.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Encryptor` trait
//! 2. Add the implementation in a new file (e.g., `aes.rs`, `ecdh.rs`)
//! 3. Add a tag variant to `EncryptorKind`
//! 4. Re-export from this module

use std::fmt;

use rand_core::{OsRng, RngCore};

use crate::error::{CipherError, Result};

pub mod aes;
pub mod ecdh;

pub use self::aes::{generate_key, AesEncryptor};
pub use self::ecdh::{EcdhEncryptor, EcdhEncryptorBuilder};

/// AES block size in bytes. Also the length of the IV prepended to every
/// ciphertext, for both backends.
pub const BLOCK_SIZE: usize = 16;

/// Tag identifying which backend produced (or will process) a ciphertext.
///
/// Stable across a backend's lifetime; useful for routing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptorKind {
    /// AES-256-CBC backend.
    Aes,
    /// P-256 keyed AES-256-CFB backend.
    Ecdh,
}

impl EncryptorKind {
    /// Tag literal for display/config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aes => "AES",
            Self::Ecdh => "ECDH",
        }
    }
}

impl fmt::Display for EncryptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encryption backend trait.
///
/// Abstracts encrypt and decrypt over byte buffers so callers can hold a
/// `&dyn Encryptor` (or `Box<dyn Encryptor>`) without knowing the concrete
/// backend. Backends hold only immutable key material, so a single instance
/// can serve concurrent calls.
pub trait Encryptor {
    /// Encrypt the provided data.
    ///
    /// Returns `IV(16) || payload`. Fails with [`CipherError::ShortData`] on
    /// empty input.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt the provided data.
    ///
    /// Expects `IV(16) || payload`; fails with [`CipherError::ShortData`] if
    /// the input is shorter than one block. Ciphertexts are unauthenticated:
    /// a wrong key produces garbage output, not an error.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Tag of this backend.
    fn kind(&self) -> EncryptorKind;
}

/// Fill `buf` from the operating system CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CipherError::RandomSource(e.to_string()))
}

/// Draw a fresh random IV.
pub(crate) fn random_iv() -> Result<[u8; BLOCK_SIZE]> {
    let mut iv = [0u8; BLOCK_SIZE];
    fill_random(&mut iv)?;
    Ok(iv)
}
