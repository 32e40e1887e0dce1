//! P-256 keyed streaming encryption backend.
//!
//! Carries a P-256 key pair and encrypts with AES-256 in CFB mode, keyed by
//! the raw bytes of the private scalar (which are exactly the AES-256 key
//! size). Ciphertexts are framed as `IV(16) || payload` with the payload the
//! same length as the plaintext.
//!
//! No Diffie-Hellman agreement is ever computed: a recorded public key is
//! informational only, and confidentiality rests entirely on the private
//! key. Two instances built from the same private key can decrypt each
//! other's output.

use ::aes::cipher::{AsyncStreamCipher, KeyIvInit};
use ::aes::Aes256;
use p256::{FieldBytes, PublicKey, SecretKey};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{fill_random, random_iv, Encryptor, EncryptorKind, BLOCK_SIZE};
use crate::error::{CipherError, Result};

type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// Streaming backend keyed by a P-256 private scalar.
///
/// Construct with [`EcdhEncryptor::new`] (fresh key pair) or via
/// [`EcdhEncryptor::builder`] to inject key material.
pub struct EcdhEncryptor {
    private_key: SecretKey,
    public_key: Option<PublicKey>,
}

/// Builder for [`EcdhEncryptor`].
///
/// Both keys are optional; [`build`](Self::build) generates a private key
/// when none was injected.
#[derive(Default)]
pub struct EcdhEncryptorBuilder {
    private_key: Option<SecretKey>,
    public_key: Option<PublicKey>,
}

impl EcdhEncryptorBuilder {
    /// Install a caller-provided private key.
    pub fn private_key(mut self, key: SecretKey) -> Self {
        self.private_key = Some(key);
        self
    }

    /// Record a peer public key. Informational: the encrypt/decrypt path
    /// does not use it.
    pub fn public_key(mut self, key: PublicKey) -> Self {
        self.public_key = Some(key);
        self
    }

    /// Finish construction, generating a private key if none was injected.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::RandomSource`] if the OS CSPRNG fails during
    /// key generation.
    pub fn build(self) -> Result<EcdhEncryptor> {
        let private_key = match self.private_key {
            Some(key) => key,
            None => {
                debug!("no private key injected, generating P-256 key");
                generate_private_key()?
            }
        };

        Ok(EcdhEncryptor {
            private_key,
            public_key: self.public_key,
        })
    }
}

impl EcdhEncryptor {
    /// Create a backend with a freshly generated P-256 key pair.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Builder for injecting key material.
    pub fn builder() -> EcdhEncryptorBuilder {
        EcdhEncryptorBuilder::default()
    }

    /// The private key this backend encrypts with.
    pub fn private_key(&self) -> &SecretKey {
        &self.private_key
    }

    /// The recorded peer public key, if any.
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }
}

/// Rejection-sample OS randomness into a valid P-256 scalar.
fn generate_private_key() -> Result<SecretKey> {
    let mut bytes = Zeroizing::new([0u8; 32]);
    loop {
        fill_random(&mut bytes[..])?;
        // Candidates >= the group order (or zero) are rejected; the retry
        // probability is negligible.
        if let Ok(key) = SecretKey::from_bytes(FieldBytes::from_slice(&bytes[..])) {
            return Ok(key);
        }
    }
}

impl Encryptor for EcdhEncryptor {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if plaintext.is_empty() {
            return Err(CipherError::ShortData);
        }

        let key = self.private_key.to_bytes();
        let iv = random_iv()?;
        let cipher = Aes256CfbEnc::new_from_slices(key.as_slice(), &iv)
            .map_err(|e| CipherError::CipherConstruction(e.to_string()))?;

        let mut ciphertext = Vec::with_capacity(BLOCK_SIZE + plaintext.len());
        ciphertext.extend_from_slice(&iv);
        ciphertext.extend_from_slice(plaintext);
        cipher.encrypt(&mut ciphertext[BLOCK_SIZE..]);

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

        let key = self.private_key.to_bytes();
        let (iv, payload) = ciphertext.split_at(BLOCK_SIZE);
        let cipher = Aes256CfbDec::new_from_slices(key.as_slice(), iv)
            .map_err(|e| CipherError::CipherConstruction(e.to_string()))?;

        let mut plaintext = payload.to_vec();
        cipher.decrypt(&mut plaintext);

        trace!(
            ciphertext_len = ciphertext.len(),
            plaintext_len = plaintext.len(),
            "decrypted"
        );

        Ok(plaintext)
    }

    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Ecdh
    }
}
