use std::fmt;

use x25519_dalek::{PublicKey, StaticSecret};

use jose::{
    crypto::{fixed_key_bytes, OctetKeyPortable},
    error::Result,
    jwk::Curve,
};

/// X25519 key-agreement public key (RFC 8037 `OKP` / `X25519`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct X25519PublicKey(pub PublicKey);

/// X25519 key-agreement private key
#[derive(Clone)]
pub struct X25519PrivateKey(pub StaticSecret);

impl X25519PrivateKey {
    /// Generate a fresh key from the thread-local CSPRNG
    pub fn generate() -> Self {
        X25519PrivateKey(StaticSecret::random_from_rng(rand::thread_rng()))
    }

    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey(PublicKey::from(&self.0))
    }

    /// Raw Diffie-Hellman output with `other`. Callers are expected to feed
    /// this through a KDF before use.
    pub fn shared_secret(&self, other: &X25519PublicKey) -> Vec<u8> {
        self.0.diffie_hellman(&other.0).as_bytes().to_vec()
    }
}

impl fmt::Debug for X25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X25519PrivateKey")
            .field("public_key", &self.public_key().0)
            .finish_non_exhaustive()
    }
}

impl PartialEq for X25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes() == other.0.to_bytes()
    }
}

impl Eq for X25519PrivateKey {}

impl OctetKeyPortable for X25519PublicKey {
    const CURVE: Curve = Curve::X25519;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        Ok(X25519PublicKey(PublicKey::from(fixed_key_bytes::<32>(raw)?)))
    }
}

impl OctetKeyPortable for X25519PrivateKey {
    const CURVE: Curve = Curve::X25519;
    const IS_PRIVATE: bool = true;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        Ok(X25519PrivateKey(StaticSecret::from(fixed_key_bytes::<32>(
            raw,
        )?)))
    }

    fn public_raw_representation(&self) -> Option<Vec<u8>> {
        Some(self.public_key().raw_representation())
    }
}

#[cfg(test)]
mod tests {
    use super::{X25519PrivateKey, X25519PublicKey};
    use jose::{
        crypto::{KeyExportable, KeyFormat, KeyImportable},
        error::Error,
        jwk::{AnyJsonWebKey, Curve, JsonWebKey, KeyType},
    };

    #[test]
    fn it_agrees_on_a_shared_secret() {
        let alice = X25519PrivateKey::generate();
        let bob = X25519PrivateKey::generate();

        assert_eq!(
            alice.shared_secret(&bob.public_key()),
            bob.shared_secret(&alice.public_key())
        );
    }

    #[test]
    fn it_publishes_an_x25519_jwk() {
        let private_key = X25519PrivateKey::generate();
        let key = AnyJsonWebKey::from(private_key.public_key().storage());

        assert_eq!(key.key_type(), Some(KeyType::OctetKeyPair));
        assert_eq!(key.curve(), Some(Curve::X25519));
        assert_eq!(
            key.x_coordinate(),
            Some(private_key.public_key().0.as_bytes().to_vec())
        );
    }

    #[test]
    fn it_round_trips_raw_and_jwk() {
        let private_key = X25519PrivateKey::generate();
        let public_key = private_key.public_key();

        for format in [KeyFormat::Raw, KeyFormat::Jwk] {
            let exported = public_key.export_key(format).unwrap();
            assert_eq!(
                X25519PublicKey::import_key(&exported, format).unwrap(),
                public_key
            );

            let exported = private_key.export_key(format).unwrap();
            assert_eq!(
                X25519PrivateKey::import_key(&exported, format).unwrap(),
                private_key
            );
        }
    }

    #[test]
    fn it_refuses_an_ed25519_jwk() {
        let jwk = br#"{"kty":"OKP","crv":"Ed25519","x":"11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"}"#;

        assert!(matches!(
            X25519PublicKey::import_key(jwk, KeyFormat::Jwk),
            Err(Error::InvalidKeyFormat { .. })
        ));
    }

    #[test]
    fn it_refuses_an_empty_raw_key() {
        assert!(matches!(
            X25519PublicKey::import_key(&[], KeyFormat::Raw),
            Err(Error::InvalidKeySize { .. })
        ));
    }
}
