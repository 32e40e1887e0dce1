//! AES-256-CBC encryption backend.
//!
//! Ciphertexts are framed as `IV(16) || payload`, where the payload is the
//! PKCS#7-padded plaintext encrypted in CBC mode. The IV is drawn fresh from
//! the OS CSPRNG on every call.

use ::aes::cipher::block_padding::{NoPadding, Pkcs7};
use ::aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use ::aes::Aes256;
use tracing::trace;
use zeroize::Zeroizing;

use super::{fill_random, random_iv, Encryptor, EncryptorKind, BLOCK_SIZE};
use crate::error::{CipherError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Generate a random 256-bit AES key.
///
/// # Errors
///
/// Returns [`CipherError::RandomSource`] if the OS CSPRNG fails.
pub fn generate_key() -> Result<[u8; KEY_SIZE]> {
    let mut key = [0u8; KEY_SIZE];
    fill_random(&mut key)?;
    Ok(key)
}

/// Symmetric AES-256-CBC backend.
///
/// Create with [`AesEncryptor::new`] from a 32-byte key (see
/// [`generate_key`]). The key is zeroized when the backend is dropped.
pub struct AesEncryptor {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl std::fmt::Debug for AesEncryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesEncryptor")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl AesEncryptor {
    /// Create a backend holding the provided key.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless the key is exactly
    /// 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key: [u8; KEY_SIZE] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?;

        Ok(Self {
            key: Zeroizing::new(key),
        })
    }
}

impl Encryptor for AesEncryptor {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if plaintext.is_empty() {
            return Err(CipherError::ShortData);
        }

        let iv = random_iv()?;
        let cipher = Aes256CbcEnc::new_from_slices(&self.key[..], &iv)
            .map_err(|e| CipherError::CipherConstruction(e.to_string()))?;

        // Padded length is always at least one byte longer than the input:
        // a block-aligned plaintext gains a full padding block.
        let padded_len = (plaintext.len() / BLOCK_SIZE + 1) * BLOCK_SIZE;
        let mut ciphertext = Vec::with_capacity(BLOCK_SIZE + padded_len);
        ciphertext.extend_from_slice(&iv);
        ciphertext.extend(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext));

        trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted"
        );

        Ok(ciphertext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < BLOCK_SIZE {
            return Err(CipherError::ShortData);
        }

        let (iv, payload) = ciphertext.split_at(BLOCK_SIZE);
        let cipher = Aes256CbcDec::new_from_slices(&self.key[..], iv)
            .map_err(|e| CipherError::CipherConstruction(e.to_string()))?;

        // Decrypt without library unpadding, then strip the trailing pad
        // count by hand. The pad bytes are not validated, so a wrong key
        // yields garbage rather than an error. A payload truncated mid-block
        // cannot be decrypted at all.
        let mut plaintext = cipher
            .decrypt_padded_vec_mut::<NoPadding>(payload)
            .map_err(|_| CipherError::ShortData)?;

        let pad = plaintext.last().copied().unwrap_or(0) as usize;
        plaintext.truncate(plaintext.len().saturating_sub(pad));

        trace!(
            ciphertext_len = ciphertext.len(),
            plaintext_len = plaintext.len(),
            "decrypted"
        );

        Ok(plaintext)
    }

    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Aes
    }
}
