//! Lockbox - end-to-end encryption primitives behind a single trait.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cipher/           # Encryption backends
//! │   ├── mod           # Encryptor trait, backend tags, CSPRNG helpers
//! │   ├── aes           # AES-256-CBC backend with PKCS#7 padding
//! │   └── ecdh          # P-256 keyed AES-256-CFB streaming backend
//! └── error             # Error types
//! ```
//!
//! # Features
//!
//! - One polymorphic [`Encryptor`] trait over both backends
//! - AES-256 in CBC mode with PKCS#7 padding and per-message random IVs
//! - A streaming backend keyed by a P-256 private scalar (CFB mode, no padding)
//! - Sentinel errors callers can match on
//!
//! Both backends frame ciphertexts as `IV(16) || payload`. Neither backend
//! authenticates ciphertexts: decrypting with the wrong key yields garbage,
//! not an error.
//!
//! ```no_run
//! use lockbox::{generate_key, AesEncryptor, EcdhEncryptor, Encryptor};
//!
//! # fn main() -> lockbox::Result<()> {
//! let key = generate_key()?;
//! let aes = AesEncryptor::new(&key)?;
//! let ciphertext = aes.encrypt(b"Hello, world!")?;
//! assert_eq!(aes.decrypt(&ciphertext)?, b"Hello, world!");
//!
//! // Same calls through the trait, different backend.
//! let ecdh: Box<dyn Encryptor> = Box::new(EcdhEncryptor::new()?);
//! let ciphertext = ecdh.encrypt(b"Hello, world!")?;
//! assert_eq!(ecdh.decrypt(&ciphertext)?, b"Hello, world!");
//! # Ok(())
//! # }
//! ```

pub mod cipher;
pub mod error;

pub use cipher::{
    generate_key, AesEncryptor, EcdhEncryptor, EcdhEncryptorBuilder, Encryptor, EncryptorKind,
    BLOCK_SIZE,
};
pub use error::{CipherError, Result};
