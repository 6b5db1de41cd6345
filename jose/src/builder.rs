use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::{
    container::ProtectedDataWebContainer,
    crypto::JsonWebSigningKey,
    error::{Error, Result},
    header::JoseHeader,
    jwk::{AnyJsonWebKey, JsonWebKey},
    jws::JsonWebSignature,
    signature::SignatureHeader,
    storage::ValueStorage,
};

/// A signable is a JWS that has all the header state it needs in order to
/// be signed, but has not been applied to a payload yet.
pub struct Signable<'a, K>
where
    K: JsonWebSigningKey + ?Sized,
{
    pub signer: &'a K,
    pub protected: JoseHeader,
    pub unprotected: Option<JoseHeader>,
}

impl<'a, K> Signable<'a, K>
where
    K: JsonWebSigningKey + ?Sized,
{
    /// Sign `payload`, keeping only the signature object. The payload is
    /// expected to travel separately.
    pub fn sign_detached(&self, payload: &[u8]) -> Result<SignatureHeader> {
        SignatureHeader::sign(
            self.protected.clone(),
            self.unprotected.clone(),
            &ProtectedDataWebContainer::new(payload),
            self.signer,
        )
    }

    /// Sign `payload` into a JWS. A JWS carrying unprotected parameters
    /// has no compact form; see [`JsonWebSignature::encode`].
    pub fn sign(&self, payload: &[u8]) -> Result<JsonWebSignature> {
        let payload = ProtectedDataWebContainer::new(payload);
        let signature = SignatureHeader::sign(
            self.protected.clone(),
            self.unprotected.clone(),
            &payload,
            self.signer,
        )?;
        Ok(JsonWebSignature::new(signature, payload))
    }
}

/// A builder API for JWS signatures
pub struct JwsBuilder<'a, K>
where
    K: JsonWebSigningKey + ?Sized,
{
    signer: Option<&'a K>,

    key_id: Option<String>,
    type_: Option<String>,
    content_type: Option<String>,
    key_embedder: Option<fn(&K) -> ValueStorage>,
    unencoded_payload: bool,

    protected_parameters: Vec<(String, Value)>,
    unprotected: Option<JoseHeader>,
}

impl<'a, K> Default for JwsBuilder<'a, K>
where
    K: JsonWebSigningKey + ?Sized,
{
    /// Create an empty builder.
    /// Before finalising the builder, you need to at least call `signed_by`.
    ///
    /// To finalise the builder, call its `build` method.
    fn default() -> Self {
        JwsBuilder {
            signer: None,

            key_id: None,
            type_: None,
            content_type: None,
            key_embedder: None,
            unencoded_payload: false,

            protected_parameters: Vec::new(),
            unprotected: None,
        }
    }
}

impl<'a, K> JwsBuilder<'a, K>
where
    K: JsonWebSigningKey + ?Sized,
{
    /// The key the signature is produced with. Its algorithm goes into the
    /// protected `alg` parameter.
    pub fn signed_by(mut self, signer: &'a K) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_key_id(mut self, key_id: &str) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn with_type(mut self, type_: &str) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Publish the public half of the signer in the protected `jwk`
    /// parameter
    pub fn embedding_key(mut self) -> Self
    where
        K: JsonWebKey,
    {
        let embed: fn(&K) -> ValueStorage = |signer| signer.storage();
        self.key_embedder = Some(embed);
        self
    }

    /// Append the payload to the signing input without base64url encoding
    /// it (RFC 7797)
    pub fn with_unencoded_payload(mut self) -> Self {
        self.unencoded_payload = true;
        self
    }

    /// Add an arbitrary protected header parameter
    pub fn with_protected_parameter<T: Serialize>(mut self, name: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.protected_parameters.push((name.into(), value)),
            Err(error) => warn!("Could not add header parameter {}: {}", name, error),
        }
        self
    }

    /// Add an unprotected header parameter. These are not covered by the
    /// signature.
    pub fn with_unprotected_parameter<T: Serialize>(mut self, name: &str, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self
                .unprotected
                .get_or_insert_with(JoseHeader::new)
                .set(name, value),
            Err(error) => warn!("Could not add header parameter {}: {}", name, error),
        }
        self
    }

    fn protected_header(&self, signer: &K) -> Result<JoseHeader> {
        let mut header = JoseHeader::with_algorithm(signer.algorithm());
        header.set_key_id(self.key_id.clone());
        header.set_type(self.type_.clone());
        header.set_content_type(self.content_type.clone());
        header.set_json_web_key(
            self.key_embedder
                .map(|embed| AnyJsonWebKey::from(embed(signer)).public_key()),
        )?;

        for (name, value) in &self.protected_parameters {
            header.set(name.as_str(), value.clone());
        }

        if self.unencoded_payload {
            header.set_unencoded_payload();
        }

        Ok(header)
    }

    pub fn build(self) -> Result<Signable<'a, K>> {
        match self.signer {
            Some(signer) => Ok(Signable {
                signer,
                protected: self.protected_header(signer)?,
                unprotected: self.unprotected,
            }),
            None => Err(Error::malformed("Missing signer")),
        }
    }
}
