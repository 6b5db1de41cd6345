//! Error types for jose

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error types for key handling, protected containers and signatures
#[derive(Error, Debug)]
pub enum Error {
    /// A key object is missing a required field, or its fields describe a
    /// different key than the one requested
    #[error("Invalid key format: {msg}")]
    InvalidKeyFormat {
        /// Error message
        msg: String,
    },
    /// Raw key material has the wrong length for its curve
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// Length required by the curve
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
    /// Bytes could not be decoded where a decode was required
    #[error("Malformed data: {msg}")]
    MalformedData {
        /// Error message
        msg: String,
    },
    /// The bytes held by a protected container no longer describe its value
    #[error("Protected data does not match its decoded value")]
    IntegrityMismatch,
    /// A signature did not verify
    #[error("Signature verification failed")]
    AuthenticationFailure,
    /// The requested key format is not supported by this key type
    #[error("Unsupported key format: {format}")]
    UnsupportedFormat {
        /// Name of the format that was requested
        format: String,
    },
    /// Key provider errors
    #[error(transparent)]
    Provider(ProviderError),
}

impl Error {
    pub(crate) fn invalid_key_format(msg: impl Into<String>) -> Self {
        Error::InvalidKeyFormat { msg: msg.into() }
    }

    pub(crate) fn malformed(msg: impl ToString) -> Self {
        Error::MalformedData {
            msg: msg.to_string(),
        }
    }
}

/// Error raised by an external key provider
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ProviderError {
    #[from]
    inner: anyhow::Error,
}

impl From<anyhow::Error> for Error {
    fn from(inner: anyhow::Error) -> Self {
        Self::Provider(ProviderError { inner })
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::malformed(error)
    }
}

impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Error::malformed(error)
    }
}
