//! A single JWS signature: protected header, unprotected header and the
//! signature bytes, plus the signing input they cover.

use log::{debug, warn};
use serde::{
    de::{self, MapAccess, Visitor},
    ser::{self, SerializeStruct},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

use crate::{
    container::{ProtectedJsonWebContainer, ProtectedWebContainer},
    crypto::{JsonWebSigningKey, JsonWebValidatingKey},
    error::{Error, Result},
    header::JoseHeader,
    serde::{base64_url_decode, Base64UrlEncode},
};

/// Represents a signature or MAC over the JWS payload and protected header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader {
    protected: ProtectedJsonWebContainer<JoseHeader>,
    unprotected: Option<JoseHeader>,
    signature: Vec<u8>,
}

impl SignatureHeader {
    pub fn new(
        protected: JoseHeader,
        unprotected: Option<JoseHeader>,
        signature: Vec<u8>,
    ) -> Result<Self> {
        Ok(SignatureHeader {
            protected: ProtectedJsonWebContainer::new(protected)?,
            unprotected,
            signature,
        })
    }

    /// Build from the protected header exactly as it appeared on the wire
    pub fn from_encoded_protected(
        protected: impl Into<Vec<u8>>,
        unprotected: Option<JoseHeader>,
        signature: Vec<u8>,
    ) -> Self {
        SignatureHeader {
            protected: ProtectedJsonWebContainer::from_encoded(protected),
            unprotected,
            signature,
        }
    }

    /// Build around an existing container, e.g. one assembled by
    /// [`ProtectedJsonWebContainer::from_parts`]
    pub fn from_protected_container(
        protected: ProtectedJsonWebContainer<JoseHeader>,
        unprotected: Option<JoseHeader>,
        signature: Vec<u8>,
    ) -> Self {
        SignatureHeader {
            protected,
            unprotected,
            signature,
        }
    }

    /// Sign `payload` under `protected` with `key`
    pub fn sign<K, P>(
        protected: JoseHeader,
        unprotected: Option<JoseHeader>,
        payload: &P,
        key: &K,
    ) -> Result<Self>
    where
        K: JsonWebSigningKey + ?Sized,
        P: ProtectedWebContainer + ?Sized,
    {
        let mut header = Self::new(protected, unprotected, Vec::new())?;
        let signing_input = header.signing_input(payload)?;
        header.signature = key.sign(&signing_input)?;
        debug!(
            "Signed {} bytes of signing input with {}",
            signing_input.len(),
            key.algorithm()
        );
        Ok(header)
    }

    pub fn protected(&self) -> &ProtectedJsonWebContainer<JoseHeader> {
        &self.protected
    }

    pub fn unprotected(&self) -> Option<&JoseHeader> {
        self.unprotected.as_ref()
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// False when the signature was absent or unreadable on the wire
    pub fn has_signature(&self) -> bool {
        !self.signature.is_empty()
    }

    /// The bytes a signer signs and a verifier checks:
    /// `BASE64URL(protected) "." BASE64URL(payload)`, or with the payload
    /// appended as is when the header declares the unencoded-payload mode.
    pub fn signing_input<P>(&self, payload: &P) -> Result<Vec<u8>>
    where
        P: ProtectedWebContainer + ?Sized,
    {
        let header = self.protected.value()?;
        let mut input = self.protected.encoded().base64_url_encode().into_bytes();
        input.push(b'.');
        match header.is_unencoded_payload() {
            true => input.extend_from_slice(payload.encoded()),
            false => input.extend_from_slice(payload.encoded().base64_url_encode().as_bytes()),
        }
        Ok(input)
    }

    /// Check the signature over `payload` with `key`
    pub fn verify<K, P>(&self, payload: &P, key: &K) -> Result<()>
    where
        K: JsonWebValidatingKey + ?Sized,
        P: ProtectedWebContainer + ?Sized,
    {
        self.protected.validate()?;
        payload.validate()?;

        if !self.has_signature() {
            return Err(Error::AuthenticationFailure);
        }

        if let Some(algorithm) = self.protected.value()?.algorithm() {
            if algorithm != key.algorithm() {
                debug!(
                    "Header algorithm {} does not match key algorithm {}",
                    algorithm,
                    key.algorithm()
                );
                return Err(Error::AuthenticationFailure);
            }
        }

        let signing_input = self.signing_input(payload)?;
        key.verify_signature(&self.signature, &signing_input)
    }
}

impl Serialize for SignatureHeader {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.protected.validate().map_err(ser::Error::custom)?;

        let fields = if self.unprotected.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("SignatureHeader", fields)?;
        state.serialize_field("protected", &self.protected)?;
        if let Some(unprotected) = &self.unprotected {
            state.serialize_field("header", unprotected)?;
        }
        state.serialize_field("signature", &self.signature.base64_url_encode())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for SignatureHeader {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SignatureHeaderVisitor)
    }
}

struct SignatureHeaderVisitor;

impl<'de> Visitor<'de> for SignatureHeaderVisitor {
    type Value = SignatureHeader;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JWS signature object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut protected: Option<ProtectedJsonWebContainer<JoseHeader>> = None;
        let mut unprotected: Option<JoseHeader> = None;
        let mut signature: Option<serde_json::Value> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "protected" => protected = Some(map.next_value()?),
                "header" => unprotected = map.next_value()?,
                "signature" => signature = Some(map.next_value()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        let protected = protected.ok_or_else(|| de::Error::missing_field("protected"))?;

        // A missing or unreadable signature decodes as empty rather than
        // failing the whole object. Such a header never verifies.
        let signature = match signature {
            Some(serde_json::Value::String(encoded)) => match base64_url_decode(&encoded) {
                Ok(signature) => signature,
                Err(error) => {
                    warn!("Ignoring signature that is not base64url: {}", error);
                    Vec::new()
                }
            },
            Some(other) => {
                warn!("Ignoring signature that is not a string: {}", other);
                Vec::new()
            }
            None => {
                warn!("JWS signature object has no signature member");
                Vec::new()
            }
        };

        Ok(SignatureHeader {
            protected,
            unprotected,
            signature,
        })
    }
}
