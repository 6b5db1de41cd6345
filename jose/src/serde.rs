use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::{de, Deserialize, Deserializer, Serializer};

use crate::error::Result;

/// base64url that never pads on output and accepts either form on input
pub const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Helper trait to encode byte buffers as unpadded base64url
pub trait Base64UrlEncode: AsRef<[u8]> {
    fn base64_url_encode(&self) -> String {
        BASE64_URL.encode(self.as_ref())
    }
}

impl<T> Base64UrlEncode for T where T: AsRef<[u8]> + ?Sized {}

/// Decode base64url text, with or without padding
pub fn base64_url_decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    Ok(BASE64_URL.decode(encoded)?)
}

/// Serialize a byte buffer as an unpadded base64url string
pub fn ser_base64_url<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&bytes.base64_url_encode())
}

/// Deserialize a base64url string into a byte buffer
pub fn de_base64_url<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    base64_url_decode(encoded).map_err(de::Error::custom)
}
