//! Opaque, pre-serialized record payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::Result;

/// A JSON document passed through untouched.
///
/// Request bodies are written into batch envelopes byte for byte, and query
/// records are handed back exactly as the platform sent them. The payload is
/// only checked to be well-formed JSON; its shape is never inspected.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Box<RawValue>);

impl RawRecord {
    /// Wrap an already serialized JSON document.
    pub fn from_json(json: impl Into<String>) -> Result<Self> {
        Ok(Self(RawValue::from_string(json.into())?))
    }

    /// Serialize `value` once and keep the resulting text.
    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self(serde_json::value::to_raw_value(value)?))
    }

    /// The JSON text.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Deserialize the payload into a concrete type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(self.0.get())?)
    }
}

impl std::fmt::Debug for RawRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RawRecord").field(&self.as_str()).finish()
    }
}

impl std::fmt::Display for RawRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for RawRecord {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for RawRecord {
    type Error = crate::error::Error;

    fn try_from(json: String) -> Result<Self> {
        Self::from_json(json)
    }
}

impl TryFrom<&str> for RawRecord {
    type Error = crate::error::Error;

    fn try_from(json: &str) -> Result<Self> {
        Self::from_json(json)
    }
}
