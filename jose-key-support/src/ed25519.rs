use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use jose::{
    crypto::{
        fixed_key_bytes, JsonWebSigningKey, JsonWebValidatingKey, OctetKeyPortable,
        SignatureAlgorithm,
    },
    error::{Error, Result},
    jwk::Curve,
};

/// Ed25519 public key (RFC 8037 `OKP` / `Ed25519`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey(pub VerifyingKey);

/// Ed25519 private key. The raw representation is the 32-byte seed.
#[derive(Clone, Debug)]
pub struct Ed25519PrivateKey(pub SigningKey);

impl Ed25519PrivateKey {
    /// Generate a fresh key from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Ed25519PrivateKey(SigningKey::generate(&mut rng))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }
}

impl PartialEq for Ed25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes() == other.0.to_bytes()
    }
}

impl Eq for Ed25519PrivateKey {}

impl OctetKeyPortable for Ed25519PublicKey {
    const CURVE: Curve = Curve::Ed25519;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        let bytes = fixed_key_bytes(raw)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|error| Error::InvalidKeyFormat {
            msg: format!("not an Ed25519 point, {error}"),
        })?;
        Ok(Ed25519PublicKey(key))
    }
}

impl OctetKeyPortable for Ed25519PrivateKey {
    const CURVE: Curve = Curve::Ed25519;
    const IS_PRIVATE: bool = true;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        Ok(Ed25519PrivateKey(SigningKey::from_bytes(&fixed_key_bytes(
            raw,
        )?)))
    }

    fn public_raw_representation(&self) -> Option<Vec<u8>> {
        Some(self.public_key().raw_representation())
    }
}

impl JsonWebValidatingKey for Ed25519PublicKey {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::EdDSA
    }

    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        let signature = Signature::from_slice(signature).map_err(|error| {
            debug!("Unreadable Ed25519 signature: {}", error);
            Error::AuthenticationFailure
        })?;
        self.0
            .verify(data, &signature)
            .map_err(|_| Error::AuthenticationFailure)
    }
}

impl JsonWebValidatingKey for Ed25519PrivateKey {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::EdDSA
    }

    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        self.public_key().verify_signature(signature, data)
    }
}

impl JsonWebSigningKey for Ed25519PrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature: Signature = self.0.sign(data);
        Ok(signature.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::{Ed25519PrivateKey, Ed25519PublicKey};
    use jose::{
        crypto::{JsonWebSigningKey, JsonWebValidatingKey, KeyExportable, KeyFormat, KeyImportable},
        error::Error,
    };

    #[test]
    fn it_can_sign_and_verify_data() {
        let private_key = Ed25519PrivateKey::generate();
        let data = &[0xdeu8, 0xad, 0xbe, 0xef];
        let signature = private_key.sign(data).unwrap();

        private_key
            .public_key()
            .verify_signature(&signature, data)
            .unwrap();
    }

    #[test]
    fn it_rejects_a_signature_over_other_data() {
        let private_key = Ed25519PrivateKey::generate();
        let signature = private_key.sign(b"one").unwrap();

        assert!(matches!(
            private_key.public_key().verify_signature(&signature, b"two"),
            Err(Error::AuthenticationFailure)
        ));
        assert!(matches!(
            private_key.public_key().verify_signature(&signature[..63], b"one"),
            Err(Error::AuthenticationFailure)
        ));
    }

    #[test]
    fn it_round_trips_raw_and_jwk() {
        let private_key = Ed25519PrivateKey::generate();
        let public_key = private_key.public_key();

        for format in [KeyFormat::Raw, KeyFormat::Jwk] {
            let exported = public_key.export_key(format).unwrap();
            assert_eq!(
                Ed25519PublicKey::import_key(&exported, format).unwrap(),
                public_key
            );

            let exported = private_key.export_key(format).unwrap();
            assert_eq!(
                Ed25519PrivateKey::import_key(&exported, format).unwrap(),
                private_key
            );
        }
    }

    #[test]
    fn it_refuses_raw_keys_of_the_wrong_size() {
        for raw in [&[][..], &[1; 31][..], &[1; 33][..]] {
            assert!(matches!(
                Ed25519PublicKey::import_key(raw, KeyFormat::Raw),
                Err(Error::InvalidKeySize { .. })
            ));
            assert!(matches!(
                Ed25519PrivateKey::import_key(raw, KeyFormat::Raw),
                Err(Error::InvalidKeySize { .. })
            ));
        }
    }

    #[test]
    fn it_refuses_bytes_that_are_not_a_curve_point() {
        // y = 2 has no matching x on edwards25519
        let mut raw = [0u8; 32];
        raw[0] = 2;

        assert!(matches!(
            Ed25519PublicKey::import_key(&raw, KeyFormat::Raw),
            Err(Error::InvalidKeyFormat { .. })
        ));
    }

    #[test]
    fn it_refuses_unsupported_formats() {
        let private_key = Ed25519PrivateKey::generate();
        assert!(matches!(
            private_key.export_key(KeyFormat::Spki),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            private_key.public_key().export_key(KeyFormat::Pkcs8),
            Err(Error::UnsupportedFormat { .. })
        ));
    }
}
