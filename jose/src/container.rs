//! Containers that keep a value together with the exact bytes it was read
//! from, so signatures are always computed over what went on the wire.

use std::{fmt, sync::OnceLock};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::{Error, Result},
    serde::{de_base64_url, ser_base64_url},
};

/// Something whose encoded bytes can be fed into a signing input
pub trait ProtectedWebContainer {
    /// The bytes to sign or verify. Never a re-encoding of the value.
    fn encoded(&self) -> &[u8];

    /// Check that [`encoded`](Self::encoded) still describes the held value
    fn validate(&self) -> Result<()>;
}

/// A JSON value paired with its serialized form.
///
/// When built from wire bytes the value is decoded on first access and kept.
/// A decode failure is only reported when the value is asked for.
pub struct ProtectedJsonWebContainer<T> {
    encoded: Vec<u8>,
    value: OnceLock<T>,
}

impl<T> ProtectedJsonWebContainer<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Serialize `value` and keep both forms
    pub fn new(value: T) -> Result<Self> {
        let encoded = serde_json::to_vec(&value)?;
        Ok(Self::from_parts(value, encoded))
    }

    /// Keep `encoded` verbatim; the value is decoded lazily
    pub fn from_encoded(encoded: impl Into<Vec<u8>>) -> Self {
        ProtectedJsonWebContainer {
            encoded: encoded.into(),
            value: OnceLock::new(),
        }
    }

    /// Pair an already decoded value with its wire bytes without checking
    /// them against each other. Call [`validate`](ProtectedWebContainer::validate)
    /// before signing.
    pub fn from_parts(value: T, encoded: impl Into<Vec<u8>>) -> Self {
        ProtectedJsonWebContainer {
            encoded: encoded.into(),
            value: OnceLock::from(value),
        }
    }

    pub fn value(&self) -> Result<&T> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let decoded = self.decode()?;
        Ok(self.value.get_or_init(|| decoded))
    }

    pub fn into_value(self) -> Result<T> {
        let ProtectedJsonWebContainer { encoded, value } = self;
        match value.into_inner() {
            Some(value) => Ok(value),
            None => decode(&encoded),
        }
    }

    fn decode(&self) -> Result<T> {
        decode(&self.encoded)
    }
}

fn decode<T: DeserializeOwned>(encoded: &[u8]) -> Result<T> {
    serde_json::from_slice(encoded)
        .map_err(|error| Error::malformed(format!("Could not decode protected value: {error}")))
}

impl<T> ProtectedWebContainer for ProtectedJsonWebContainer<T>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    fn validate(&self) -> Result<()> {
        let held = match self.value.get() {
            Some(held) => held,
            // Nothing decoded yet, so the value is whatever the bytes say
            None => return self.value().map(|_| ()),
        };
        match self.decode()? == *held {
            true => Ok(()),
            false => Err(Error::IntegrityMismatch),
        }
    }
}

impl<T: Clone> Clone for ProtectedJsonWebContainer<T> {
    fn clone(&self) -> Self {
        ProtectedJsonWebContainer {
            encoded: self.encoded.clone(),
            value: self.value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ProtectedJsonWebContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectedJsonWebContainer")
            .field("encoded", &String::from_utf8_lossy(&self.encoded))
            .field("value", &self.value.get())
            .finish()
    }
}

/// Two containers are equal when they carry the same bytes
impl<T> PartialEq for ProtectedJsonWebContainer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl<T> Eq for ProtectedJsonWebContainer<T> {}

impl<T> Serialize for ProtectedJsonWebContainer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ser_base64_url(&self.encoded, serializer)
    }
}

impl<'de, T> Deserialize<'de> for ProtectedJsonWebContainer<T>
where
    T: Serialize + DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        de_base64_url(deserializer).map(Self::from_encoded)
    }
}

/// An opaque payload; its bytes are the value
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProtectedDataWebContainer {
    encoded: Vec<u8>,
}

impl ProtectedDataWebContainer {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        ProtectedDataWebContainer {
            encoded: data.into(),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.encoded
    }
}

impl ProtectedWebContainer for ProtectedDataWebContainer {
    fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl From<Vec<u8>> for ProtectedDataWebContainer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ProtectedDataWebContainer {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl From<&str> for ProtectedDataWebContainer {
    fn from(data: &str) -> Self {
        Self::new(data.as_bytes())
    }
}
