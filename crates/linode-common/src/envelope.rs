//! The response envelope shared by every action.
//!
//! ```json
//! {"ERRORARRAY": [], "ACTION": "linode.list", "DATA": [...]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;

use crate::decode::{self, FromSingle, Record};
use crate::error::{DecodeError, RemoteError};

/// Top-level response body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    /// Errors reported by the server; only the first one matters
    #[serde(rename = "ERRORARRAY", default)]
    pub errors: Vec<RemoteError>,
    /// Untyped payload
    #[serde(rename = "DATA", default)]
    pub data: Value,
    /// Echo of the requested action
    #[serde(rename = "ACTION", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<SmolStr>,
}

impl Envelope {
    /// Parse a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// The first reported error, when its code is nonzero.
    pub fn error(&self) -> Option<&RemoteError> {
        self.errors.first().filter(|e| e.code != 0)
    }

    /// Apply the first-error rule and hand out the payload.
    ///
    /// When the first entry of `ERRORARRAY` carries a nonzero code the call
    /// failed and `DATA` is left uninterpreted.
    pub fn into_data(self) -> Result<ApiResponse, RemoteError> {
        if let Some(err) = self.error() {
            return Err(err.clone());
        }
        Ok(ApiResponse {
            action: self.action,
            data: self.data,
        })
    }
}

/// Payload of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    action: Option<SmolStr>,
    data: Value,
}

impl ApiResponse {
    /// Wrap an already extracted payload.
    pub fn new(action: Option<SmolStr>, data: Value) -> Self {
        Self { action, data }
    }

    /// Action echoed by the server, if any.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Raw payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Take the raw payload.
    pub fn into_data(self) -> Value {
        self.data
    }

    /// One exactly-named scalar out of an object payload.
    pub fn single<T: FromSingle>(&self, name: &str) -> Result<T, DecodeError> {
        decode::decode_single(&self.data, name)
    }

    /// The object payload as one record.
    pub fn object<T: Record>(&self) -> Result<T, DecodeError> {
        decode::decode_object(&self.data)
    }

    /// The array payload as a list of records.
    pub fn records<T: Record>(&self) -> Result<Vec<T>, DecodeError> {
        decode::decode_records(&self.data)
    }
}
