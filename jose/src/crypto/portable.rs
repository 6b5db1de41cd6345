use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{
    error::{Error, Result},
    jwk::{AnyJsonWebKey, Curve, JsonWebKey},
    storage::ValueStorage,
};

/// Wire formats a key can be imported from or exported to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum KeyFormat {
    /// Algorithm-native bytes of the key
    #[strum(serialize = "raw")]
    Raw,
    /// DER `SubjectPublicKeyInfo`
    #[strum(serialize = "spki")]
    Spki,
    /// DER PKCS#8 `PrivateKeyInfo`
    #[strum(serialize = "pkcs8")]
    Pkcs8,
    /// JSON Web Key object
    #[strum(serialize = "jwk")]
    Jwk,
}

impl KeyFormat {
    fn unsupported(self) -> Error {
        Error::UnsupportedFormat {
            format: self.to_string(),
        }
    }
}

/// A key that can be constructed from an external representation
pub trait KeyImportable: Sized {
    fn import_key(key: &[u8], format: KeyFormat) -> Result<Self>;
}

/// A key that can be written out to an external representation
pub trait KeyExportable {
    fn export_key(&self, format: KeyFormat) -> Result<Vec<u8>>;
}

/// Implemented by curve keys whose whole state is a fixed-size byte string
/// (Ed25519, X25519 and friends). Implementors get [`JsonWebKey`],
/// [`KeyImportable`] and [`KeyExportable`] for free.
pub trait OctetKeyPortable: Sized {
    /// The curve published in the `crv` member
    const CURVE: Curve;

    /// Whether the raw representation is private material (`d`) rather
    /// than a public key (`x`)
    const IS_PRIVATE: bool = false;

    fn raw_representation(&self) -> Vec<u8>;

    /// Build a key from raw bytes. Implementations report a wrong length
    /// as [`Error::InvalidKeySize`].
    fn from_raw_representation(raw: &[u8]) -> Result<Self>;

    /// Raw public key belonging to a private key. Public keys return `None`.
    fn public_raw_representation(&self) -> Option<Vec<u8>> {
        None
    }
}

impl<K> JsonWebKey for K
where
    K: OctetKeyPortable,
{
    fn storage(&self) -> ValueStorage {
        let raw = self.raw_representation();
        let mut key = AnyJsonWebKey::new();
        key.set_key_type(Some(K::CURVE.key_type()));
        key.set_curve(Some(K::CURVE));
        match self.public_raw_representation() {
            Some(public) => {
                key.set_x_coordinate(Some(&public));
                key.set_private_key(Some(&raw));
            }
            None => key.set_x_coordinate(Some(&raw)),
        }
        key.into_storage()
    }

    fn from_storage(storage: ValueStorage) -> Result<Self> {
        expect_member(&storage, "kty", K::CURVE.key_type().as_ref())?;
        expect_member(&storage, "crv", K::CURVE.as_ref())?;

        let key_data = AnyJsonWebKey::from(storage);
        let (field, raw) = match K::IS_PRIVATE {
            true => ("d", key_data.private_key()),
            false => ("x", key_data.x_coordinate()),
        };
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return Err(Error::invalid_key_format(format!(
                    "missing or empty \"{field}\" member"
                )))
            }
        };

        let key = K::from_raw_representation(&raw)?;

        if let (Some(expected), Some(public)) =
            (key_data.x_coordinate(), key.public_raw_representation())
        {
            if expected != public {
                return Err(Error::invalid_key_format(
                    "\"x\" member does not belong to the private key",
                ));
            }
        }

        Ok(key)
    }
}

impl<K> KeyImportable for K
where
    K: OctetKeyPortable,
{
    fn import_key(key: &[u8], format: KeyFormat) -> Result<Self> {
        match format {
            KeyFormat::Raw => {
                if key.is_empty() {
                    return Err(Error::InvalidKeySize {
                        expected: K::CURVE.key_size(),
                        actual: 0,
                    });
                }
                K::from_raw_representation(key)
            }
            KeyFormat::Jwk => K::from_storage(ValueStorage::decode(key)?),
            other => Err(other.unsupported()),
        }
    }
}

impl<K> KeyExportable for K
where
    K: OctetKeyPortable,
{
    fn export_key(&self, format: KeyFormat) -> Result<Vec<u8>> {
        match format {
            KeyFormat::Raw => Ok(self.raw_representation()),
            KeyFormat::Jwk => self.jwk_representation(),
            other => Err(other.unsupported()),
        }
    }
}

/// A member that is present must carry the expected string value
fn expect_member(storage: &ValueStorage, field: &str, expected: &str) -> Result<()> {
    match storage.get(field) {
        None => Ok(()),
        Some(Value::String(value)) if value == expected => Ok(()),
        Some(other) => Err(Error::invalid_key_format(format!(
            "expected \"{field}\" to be {expected:?}, found {other}"
        ))),
    }
}

/// Fixed-size copy of raw key bytes, reporting a length mismatch the way
/// [`OctetKeyPortable::from_raw_representation`] expects
pub fn fixed_key_bytes<const N: usize>(raw: &[u8]) -> Result<[u8; N]> {
    raw.try_into().map_err(|_| Error::InvalidKeySize {
        expected: N,
        actual: raw.len(),
    })
}
