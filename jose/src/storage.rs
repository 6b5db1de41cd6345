//! Untyped, order-preserving field store shared by keys and headers.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    serde::{base64_url_decode, Base64UrlEncode},
};

/// Fields of a JSON object kept as raw values, in insertion order.
///
/// No validation happens here. Fields that no typed view knows about are
/// carried along untouched, so decoding and re-encoding keeps them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueStorage {
    fields: Map<String, Value>,
}

impl ValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field. Replacing an existing field keeps its position.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Field names in the order they were first set
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Read a field as `T`. Absent fields and fields that do not decode as
    /// `T` both read as `None`.
    pub fn get_typed<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.get(field)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Write `value` to a field, or remove the field when `value` is `None`
    pub fn set_typed<T: Serialize>(&mut self, field: &str, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.set(field, serde_json::to_value(value)?),
            None => {
                self.remove(field);
            }
        }
        Ok(())
    }

    /// Read a base64url-encoded binary field
    pub fn get_data(&self, field: &str) -> Option<Vec<u8>> {
        self.get(field)
            .and_then(Value::as_str)
            .and_then(|encoded| base64_url_decode(encoded).ok())
    }

    /// Write a binary field as unpadded base64url, or remove it on `None`
    pub fn set_data(&mut self, field: &str, data: Option<&[u8]>) {
        match data {
            Some(data) => self.set(field, data.base64_url_encode()),
            None => {
                self.remove(field);
            }
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.fields)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(ValueStorage { fields }),
            other => Err(Error::malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for ValueStorage {
    fn from(fields: Map<String, Value>) -> Self {
        ValueStorage { fields }
    }
}

impl From<ValueStorage> for Value {
    fn from(storage: ValueStorage) -> Self {
        Value::Object(storage.fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
