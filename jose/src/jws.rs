//! Compact serialization of a singly signed JWS (RFC 7515 §7.1)

use std::{convert::TryFrom, str::FromStr};

use crate::{
    container::{ProtectedDataWebContainer, ProtectedWebContainer},
    crypto::{JsonWebSigningKey, JsonWebValidatingKey},
    error::{Error, Result},
    header::JoseHeader,
    serde::{base64_url_decode, Base64UrlEncode},
    signature::SignatureHeader,
};

/// A payload together with the one signature over it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonWebSignature {
    signature: SignatureHeader,
    payload: ProtectedDataWebContainer,
}

impl JsonWebSignature {
    pub fn new(signature: SignatureHeader, payload: ProtectedDataWebContainer) -> Self {
        JsonWebSignature { signature, payload }
    }

    /// Sign `payload` under `protected`
    pub fn sign<K>(
        protected: JoseHeader,
        payload: impl Into<ProtectedDataWebContainer>,
        key: &K,
    ) -> Result<Self>
    where
        K: JsonWebSigningKey + ?Sized,
    {
        let payload = payload.into();
        let signature = SignatureHeader::sign(protected, None, &payload, key)?;
        Ok(JsonWebSignature { signature, payload })
    }

    pub fn verify<K>(&self, key: &K) -> Result<()>
    where
        K: JsonWebValidatingKey + ?Sized,
    {
        self.signature.verify(&self.payload, key)
    }

    pub fn header(&self) -> &SignatureHeader {
        &self.signature
    }

    pub fn payload(&self) -> &[u8] {
        self.payload.encoded()
    }

    /// `protected.payload.signature`. An unencoded payload is written as is
    /// and may not contain `.`. The compact form has no room for an
    /// unprotected header, so one being present is an error.
    pub fn encode(&self) -> Result<String> {
        if self.signature.unprotected().is_some() {
            return Err(Error::malformed(
                "Unprotected header cannot be carried in compact form",
            ));
        }
        self.signature.protected().validate()?;

        let protected = self.signature.protected().encoded().base64_url_encode();
        let payload = match self.signature.protected().value()?.is_unencoded_payload() {
            true => {
                let payload = std::str::from_utf8(self.payload.encoded())
                    .map_err(|_| Error::malformed("Unencoded payload is not UTF-8"))?;
                if payload.contains('.') {
                    return Err(Error::malformed(
                        "Unencoded payload cannot contain '.' in compact form",
                    ));
                }
                payload.to_owned()
            }
            false => self.payload.encoded().base64_url_encode(),
        };
        let signature = self.signature.signature().base64_url_encode();

        Ok(format!("{protected}.{payload}.{signature}"))
    }
}

impl FromStr for JsonWebSignature {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut parts = token.split('.');
        let (protected, payload, signature) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(protected), Some(payload), Some(signature), None) => {
                (protected, payload, signature)
            }
            _ => return Err(Error::malformed("Expected three '.' separated parts")),
        };

        let protected = base64_url_decode(protected)
            .map_err(|_| Error::malformed("Could not decode protected header base64"))?;
        let signature = base64_url_decode(signature)
            .map_err(|_| Error::malformed("Could not decode signature base64"))?;
        let signature = SignatureHeader::from_encoded_protected(protected, None, signature);

        let payload = match signature.protected().value()?.is_unencoded_payload() {
            true => payload.as_bytes().to_vec(),
            false => base64_url_decode(payload)
                .map_err(|_| Error::malformed("Could not decode payload base64"))?,
        };

        Ok(JsonWebSignature::new(signature, payload.into()))
    }
}

impl<'a> TryFrom<&'a str> for JsonWebSignature {
    type Error = Error;

    fn try_from(token: &'a str) -> Result<Self, Self::Error> {
        JsonWebSignature::from_str(token)
    }
}

impl TryFrom<String> for JsonWebSignature {
    type Error = Error;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        JsonWebSignature::from_str(token.as_str())
    }
}
