//! Stateless building blocks for the Linode classic (v3) API.
//!
//! Every remote procedure in the classic API is a form-encoded `POST` of an
//! `api_action`, an `api_key`, and a flat set of parameters, answered by a JSON
//! envelope carrying an error array and an untyped `DATA` payload. This crate
//! owns everything below the per-resource call-sites:
//!
//! - [`wire`]: the closed set of parameter values and their wire strings
//! - [`args`]: flat argument maps and the [`ToArgs`] marshaling trait for
//!   options structures
//! - [`decode`]: single-value and record decoding with the lenient coercion
//!   rules the server's responses require
//! - [`envelope`]: the response envelope and the first-error rule
//! - [`call`]: request construction, response processing and a stateless
//!   call builder over any [`http_client::HttpClient`]
//!
//! The `linode-derive` crate generates [`ToArgs`] and [`decode::Record`]
//! implementations from field attributes.

#![warn(missing_docs)]
pub use smol_str;
pub use url;

pub mod args;
pub mod call;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod wire;

pub use args::{ApiArgs, ArgField, ArgMode, ToArgs};
pub use decode::{Fields, FromLenient, FromSingle, Record};
pub use envelope::{ApiResponse, Envelope};
pub use error::{ClientError, Result};
pub use wire::WireValue;

/// Default endpoint of the classic API.
pub const BASE_URL: &str = "https://api.linode.com/";
