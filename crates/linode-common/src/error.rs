//! Error types for classic API calls

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Client error type wrapping all possible error conditions of a single call
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ClientError {
    /// Malformed options structure, detected before any network activity
    #[error("invalid options: {0}")]
    Config(
        #[from]
        #[diagnostic_source]
        ConfigError,
    ),

    /// Request serialization failed
    #[error("{0}")]
    Encode(
        #[from]
        #[diagnostic_source]
        EncodeError,
    ),

    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Response body was not a valid envelope
    #[error("{0}")]
    Protocol(
        #[from]
        #[diagnostic_source]
        ProtocolError,
    ),

    /// The server reported an error in `ERRORARRAY`
    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] RemoteError),

    /// Response payload did not have the expected shape
    #[error("{0}")]
    Decode(
        #[from]
        #[diagnostic_source]
        DecodeError,
    ),
}

impl ClientError {
    /// The server-side error, if the call failed remotely.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}

/// Malformed options structure.
///
/// Derived [`ToArgs`](crate::ToArgs) implementations reject most of these at
/// compile time; hand-written implementations hit them at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// A field has no wire name
    #[error("no args tag set on {type_name}.{field}")]
    #[diagnostic(code(linode_common::args::missing_tag))]
    MissingTag {
        /// Options structure
        type_name: &'static str,
        /// Offending field
        field: &'static str,
    },

    /// A field declared int-encoded does not hold a boolean
    #[error("{type_name}.{field} has an int tag, but is not of type bool")]
    #[diagnostic(code(linode_common::args::int_not_bool))]
    IntModeNotBool {
        /// Options structure
        type_name: &'static str,
        /// Offending field
        field: &'static str,
    },

    /// The tag carries a mode suffix other than `int`
    #[error("unknown encoding mode `{mode}` in args tag `{tag}`")]
    #[diagnostic(code(linode_common::args::unknown_mode))]
    UnknownMode {
        /// Full tag text
        tag: SmolStr,
        /// Unrecognized suffix
        mode: SmolStr,
    },

    /// Two fields of the same structure map to one wire name
    #[error("wire name `{name}` is bound by more than one field of {type_name}")]
    #[diagnostic(code(linode_common::args::duplicate_name))]
    DuplicateName {
        /// Options structure
        type_name: &'static str,
        /// Repeated wire name
        name: SmolStr,
    },
}

/// Error type for encoding requests
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EncodeError {
    /// Failed to serialize the form body
    #[error("Failed to serialize form: {0}")]
    Form(
        #[from]
        #[source]
        serde_html_form::ser::Error,
    ),
    /// Request construction failed (malformed URI, headers, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Transport-level errors that occur during HTTP communication
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Failed to establish connection to server
    #[error("Connection error: {0}")]
    Connect(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Request rejected by the HTTP layer before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Other transport error, including body read failures
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Classify an error returned by an [`HttpClient`](crate::http_client::HttpClient).
    ///
    /// `reqwest` errors and errors that already are a `TransportError` keep
    /// their kind; anything else becomes [`TransportError::Other`].
    pub fn from_client<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(error);
        #[cfg(feature = "reqwest-client")]
        let boxed = match boxed.downcast::<reqwest::Error>() {
            Ok(e) => return Self::from(*e),
            Err(other) => other,
        };
        match boxed.downcast::<TransportError>() {
            Ok(e) => *e,
            Err(other) => Self::Other(other),
        }
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}

/// The response body could not be parsed as an envelope
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("malformed response to `{action}` (HTTP {status}): {source}")]
#[diagnostic(code(linode_common::envelope::malformed))]
pub struct ProtocolError {
    /// Requested action
    pub action: SmolStr,
    /// HTTP status of the response
    pub status: http::StatusCode,
    /// Underlying JSON error
    #[source]
    pub source: serde_json::Error,
}

/// First entry of a non-empty `ERRORARRAY`
#[derive(
    Debug, Clone, PartialEq, Eq, Deserialize, Serialize, thiserror::Error, miette::Diagnostic,
)]
#[error("api: {code}: {message}")]
#[diagnostic(code(linode_common::remote))]
pub struct RemoteError {
    /// Numeric error code; zero means "no error"
    #[serde(rename = "ERRORCODE")]
    pub code: i64,
    /// Human readable message
    #[serde(rename = "ERRORMESSAGE", default)]
    pub message: String,
}

/// Response deserialization errors
#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// Payload was not the JSON type the decoder needs
    #[error("expected a JSON {expected}, found {found}")]
    #[diagnostic(code(linode_common::decode::shape))]
    UnexpectedShape {
        /// Wanted JSON type
        expected: &'static str,
        /// JSON type present
        found: &'static str,
    },

    /// Named field absent from a single-value payload
    #[error("{name} not found in response, available keys: {available:?}")]
    #[diagnostic(code(linode_common::decode::missing))]
    MissingField {
        /// Requested field
        name: SmolStr,
        /// Keys that were present
        available: Vec<String>,
    },

    /// Field present with an incompatible JSON type
    #[error("cannot read {name} as {expected}, value: {found}")]
    #[diagnostic(code(linode_common::decode::type_mismatch))]
    TypeMismatch {
        /// Field name
        name: SmolStr,
        /// Requested target type
        expected: &'static str,
        /// Offending JSON value
        found: String,
    },

    /// Lenient coercion of a record field failed
    #[error("cannot coerce {key} into {expected}, value: {value}")]
    #[diagnostic(code(linode_common::decode::coerce))]
    Coerce {
        /// Record key
        key: SmolStr,
        /// Target type
        expected: &'static str,
        /// Offending JSON value
        value: String,
    },

    /// Payload decoded but carried a value the call rejects
    #[error("unexpected {context} response: '{found}'")]
    #[diagnostic(code(linode_common::decode::unexpected))]
    UnexpectedValue {
        /// What was being checked
        context: SmolStr,
        /// Value received
        found: String,
    },

    /// A record of a list failed to decode
    #[error("record {index}: {source}")]
    Record {
        /// Position in the source array
        index: usize,
        /// What went wrong
        #[source]
        source: Box<DecodeError>,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
