use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    crypto::SignatureAlgorithm, error::Result, jwk::AnyJsonWebKey, storage::ValueStorage,
};

/// Name of the RFC 7797 unencoded-payload extension
pub const UNENCODED_PAYLOAD_EXTENSION: &str = "b64";

/// JOSE header parameters, registered or not, in the order they were set
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoseHeader {
    storage: ValueStorage,
}

impl JoseHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header announcing a signature algorithm
    pub fn with_algorithm(algorithm: SignatureAlgorithm) -> Self {
        let mut header = Self::new();
        header.set_algorithm(Some(algorithm));
        header
    }

    pub fn storage(&self) -> &ValueStorage {
        &self.storage
    }

    pub fn get(&self, parameter: &str) -> Option<&Value> {
        self.storage.get(parameter)
    }

    pub fn get_typed<T: DeserializeOwned>(&self, parameter: &str) -> Option<T> {
        self.storage.get_typed(parameter)
    }

    pub fn set(&mut self, parameter: impl Into<String>, value: impl Into<Value>) {
        self.storage.set(parameter, value)
    }

    pub fn remove(&mut self, parameter: &str) -> Option<Value> {
        self.storage.remove(parameter)
    }

    /// `alg`
    pub fn algorithm(&self) -> Option<SignatureAlgorithm> {
        self.storage.get_typed("alg")
    }

    pub fn set_algorithm(&mut self, algorithm: Option<SignatureAlgorithm>) {
        self.set_string("alg", algorithm.map(|algorithm| algorithm.to_string()))
    }

    /// `kid`
    pub fn key_id(&self) -> Option<String> {
        self.storage.get_typed("kid")
    }

    pub fn set_key_id(&mut self, key_id: Option<String>) {
        self.set_string("kid", key_id)
    }

    /// `typ`
    pub fn type_(&self) -> Option<String> {
        self.storage.get_typed("typ")
    }

    pub fn set_type(&mut self, type_: Option<String>) {
        self.set_string("typ", type_)
    }

    /// `cty`
    pub fn content_type(&self) -> Option<String> {
        self.storage.get_typed("cty")
    }

    pub fn set_content_type(&mut self, content_type: Option<String>) {
        self.set_string("cty", content_type)
    }

    /// `jwk`, the key the signature was made with
    pub fn json_web_key(&self) -> Option<AnyJsonWebKey> {
        self.storage.get_typed("jwk")
    }

    pub fn set_json_web_key(&mut self, key: Option<AnyJsonWebKey>) -> Result<()> {
        self.storage.set_typed("jwk", key)
    }

    /// `crit`. An absent list reads as empty.
    pub fn critical(&self) -> Vec<String> {
        self.storage.get_typed("crit").unwrap_or_default()
    }

    /// Replace `crit`; an empty list removes the parameter
    pub fn set_critical(&mut self, critical: Vec<String>) {
        match critical.is_empty() {
            true => {
                self.storage.remove("crit");
            }
            false => self.storage.set(
                "crit",
                critical.into_iter().map(Value::String).collect::<Vec<_>>(),
            ),
        }
    }

    /// `b64`
    pub fn base64_url_payload(&self) -> Option<bool> {
        self.storage.get("b64").and_then(Value::as_bool)
    }

    pub fn set_base64_url_payload(&mut self, b64: Option<bool>) {
        match b64 {
            Some(b64) => self.storage.set("b64", b64),
            None => {
                self.storage.remove("b64");
            }
        }
    }

    /// Declare the unencoded-payload mode: `b64` set to `false` and listed
    /// as critical so that verifiers unaware of it refuse the signature
    pub fn set_unencoded_payload(&mut self) {
        self.set_base64_url_payload(Some(false));
        let mut critical = self.critical();
        if !critical.iter().any(|name| name == UNENCODED_PAYLOAD_EXTENSION) {
            critical.push(UNENCODED_PAYLOAD_EXTENSION.into());
        }
        self.set_critical(critical);
    }

    /// True exactly when `crit` names `b64` and `b64` is literally `false`
    pub fn is_unencoded_payload(&self) -> bool {
        self.critical()
            .iter()
            .any(|name| name == UNENCODED_PAYLOAD_EXTENSION)
            && self.base64_url_payload() == Some(false)
    }

    fn set_string(&mut self, parameter: &str, value: Option<String>) {
        match value {
            Some(value) => self.storage.set(parameter, value),
            None => {
                self.storage.remove(parameter);
            }
        }
    }
}

impl From<ValueStorage> for JoseHeader {
    fn from(storage: ValueStorage) -> Self {
        JoseHeader { storage }
    }
}
