use thiserror::Error;

/// Errors returned by the encryption backends.
///
/// `ShortData` and `InvalidKeyLength` are sentinels: callers are expected to
/// match on them (the enum derives `PartialEq` for exactly that reason). The
/// remaining variants wrap the underlying cause as a message.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CipherError {
    /// Plaintext is empty, or ciphertext is shorter than one block.
    #[error("data is too short")]
    ShortData,

    /// AES keys must be exactly 32 bytes; carries the length actually given.
    #[error("invalid key length: {0}")]
    InvalidKeyLength(usize),

    /// The underlying AES primitive refused the key or IV.
    #[error("cipher construction failed: {0}")]
    CipherConstruction(String),

    /// The operating system CSPRNG failed.
    #[error("random source failure: {0}")]
    RandomSource(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;
