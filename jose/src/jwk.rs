//! Typed view over the fields of a JSON Web Key (RFC 7517 / RFC 8037).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{error::Result, storage::ValueStorage};

/// The `kty` member of a key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[derive(Serialize, Deserialize)]
pub enum KeyType {
    #[strum(serialize = "oct")]
    #[serde(rename = "oct")]
    Symmetric,
    #[strum(serialize = "RSA")]
    #[serde(rename = "RSA")]
    Rsa,
    #[strum(serialize = "EC")]
    #[serde(rename = "EC")]
    EllipticCurve,
    #[strum(serialize = "OKP")]
    #[serde(rename = "OKP")]
    OctetKeyPair,
}

/// The `crv` member of an elliptic-curve or octet-key-pair key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[derive(Serialize, Deserialize)]
pub enum Curve {
    #[strum(serialize = "P-256")]
    #[serde(rename = "P-256")]
    P256,
    #[strum(serialize = "P-384")]
    #[serde(rename = "P-384")]
    P384,
    #[strum(serialize = "P-521")]
    #[serde(rename = "P-521")]
    P521,
    #[strum(serialize = "secp256k1")]
    #[serde(rename = "secp256k1")]
    Secp256k1,
    Ed25519,
    Ed448,
    X25519,
    X448,
}

impl Curve {
    /// Length in bytes of a coordinate (or raw key) on this curve
    pub fn key_size(&self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 | Curve::Ed25519 | Curve::X25519 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
            Curve::Ed448 => 57,
            Curve::X448 => 56,
        }
    }

    /// The key type a key on this curve is published under
    pub fn key_type(&self) -> KeyType {
        match self {
            Curve::Ed25519 | Curve::Ed448 | Curve::X25519 | Curve::X448 => KeyType::OctetKeyPair,
            _ => KeyType::EllipticCurve,
        }
    }
}

/// The `use` member of a key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[derive(Serialize, Deserialize)]
pub enum KeyUsage {
    #[strum(serialize = "sig")]
    #[serde(rename = "sig")]
    Signature,
    #[strum(serialize = "enc")]
    #[serde(rename = "enc")]
    Encryption,
}

macro_rules! typed_field {
    ($(#[$doc:meta])* $getter:ident, $setter:ident, $name:literal, $ty:ty) => {
        $(#[$doc])*
        pub fn $getter(&self) -> Option<$ty> {
            self.storage.get_typed($name)
        }

        pub fn $setter(&mut self, value: Option<$ty>) {
            if let Err(error) = self.storage.set_typed($name, value) {
                log::warn!("Could not set key field {}: {}", $name, error);
            }
        }
    };
}

macro_rules! data_field {
    ($(#[$doc:meta])* $getter:ident, $setter:ident, $name:literal) => {
        $(#[$doc])*
        pub fn $getter(&self) -> Option<Vec<u8>> {
            self.storage.get_data($name)
        }

        pub fn $setter(&mut self, value: Option<&[u8]>) {
            self.storage.set_data($name, value)
        }
    };
}

/// A key of any type, read and written through its field store
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnyJsonWebKey {
    storage: ValueStorage,
}

impl AnyJsonWebKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_storage(&self) -> &ValueStorage {
        &self.storage
    }

    pub fn into_storage(self) -> ValueStorage {
        self.storage
    }

    typed_field!(
        /// `kty`
        key_type, set_key_type, "kty", KeyType
    );
    typed_field!(
        /// `crv`
        curve, set_curve, "crv", Curve
    );
    typed_field!(
        /// `kid`
        key_id, set_key_id, "kid", String
    );
    typed_field!(
        /// `alg`
        algorithm, set_algorithm, "alg", String
    );
    typed_field!(
        /// `use`
        key_usage, set_key_usage, "use", KeyUsage
    );
    data_field!(
        /// `x`, the public coordinate or raw public key
        x_coordinate, set_x_coordinate, "x"
    );
    data_field!(
        /// `y`
        y_coordinate, set_y_coordinate, "y"
    );
    data_field!(
        /// `d`, the private scalar or raw private key
        private_key, set_private_key, "d"
    );
    data_field!(
        /// `k`, the value of a symmetric key
        symmetric_key, set_symmetric_key, "k"
    );

    /// A copy of this key without private members
    pub fn public_key(&self) -> AnyJsonWebKey {
        let mut public = self.clone();
        for field in PRIVATE_FIELDS {
            public.storage.remove(field);
        }
        public
    }
}

const PRIVATE_FIELDS: &[&str] = &["d", "k", "p", "q", "dp", "dq", "qi", "oth"];

impl From<ValueStorage> for AnyJsonWebKey {
    fn from(storage: ValueStorage) -> Self {
        AnyJsonWebKey { storage }
    }
}

/// A key that can be carried in a [`ValueStorage`]
pub trait JsonWebKey: Sized {
    fn storage(&self) -> ValueStorage;

    fn from_storage(storage: ValueStorage) -> Result<Self>;

    /// The key serialized as a JWK JSON object
    fn jwk_representation(&self) -> Result<Vec<u8>> {
        self.storage().encode()
    }
}

impl JsonWebKey for AnyJsonWebKey {
    fn storage(&self) -> ValueStorage {
        self.storage.clone()
    }

    fn from_storage(storage: ValueStorage) -> Result<Self> {
        Ok(AnyJsonWebKey { storage })
    }
}
