use crate::error::Result;

use super::SignatureAlgorithm;

/// This trait must be implemented by a struct that encapsulates a public key
/// able to check signatures. It is the whole of what a signature envelope
/// needs from a crypto provider on the verification path.
pub trait JsonWebValidatingKey {
    /// The algorithm this key verifies signatures for
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Verify the alleged signature of some data against this key. A
    /// signature that does not verify is reported as
    /// [`Error::AuthenticationFailure`](crate::error::Error::AuthenticationFailure).
    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()>;
}

/// A private key that can produce signatures. Every signing key can also
/// verify what it signed.
pub trait JsonWebSigningKey: JsonWebValidatingKey {
    /// Sign some data with this key
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl<K> JsonWebValidatingKey for &K
where
    K: JsonWebValidatingKey + ?Sized,
{
    fn algorithm(&self) -> SignatureAlgorithm {
        (**self).algorithm()
    }

    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        (**self).verify_signature(signature, data)
    }
}

impl<K> JsonWebSigningKey for &K
where
    K: JsonWebSigningKey + ?Sized,
{
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(data)
    }
}
