//! # Stateless request/response mapping
//!
//! Every action is a `POST` to the endpoint root with an
//! `application/x-www-form-urlencoded` body made of `api_action`, `api_key`
//! and the flattened arguments. The response is always a JSON envelope,
//! whatever the HTTP status; its first error entry decides the outcome.

use http::{HeaderName, HeaderValue, Request, header};
use smol_str::SmolStr;
use url::Url;

use crate::args::{ApiArgs, RESERVED};
use crate::envelope::{ApiResponse, Envelope};
use crate::error::{ClientError, EncodeError, ProtocolError, Result, TransportError};
use crate::http_client::HttpClient;

/// Form content type of every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Per-request options.
#[derive(Debug, Default, Clone)]
pub struct CallOptions {
    /// `User-Agent` header value
    pub user_agent: Option<SmolStr>,
    /// Extra headers to attach to this request
    pub extra_headers: Vec<(HeaderName, HeaderValue)>,
}

/// Extension for stateless calls on any [`HttpClient`].
///
/// Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use linode_common::ApiArgs;
/// use linode_common::call::ApiExt;
///
/// let http = reqwest::Client::new();
/// let base = url::Url::parse(linode_common::BASE_URL)?;
/// let resp = http
///     .api(base, "my-key")
///     .send("test.echo", &ApiArgs::new().with("foo", "bar"))
///     .await?;
/// let echoed: String = resp.single("FOO")?;
/// # Ok(())
/// # }
/// ```
pub trait ApiExt: HttpClient {
    /// Start building a call against `base` authenticated by `api_key`.
    fn api<'a>(&'a self, base: Url, api_key: &'a str) -> ApiCall<'a, Self>
    where
        Self: Sized,
    {
        ApiCall {
            client: self,
            base,
            api_key,
            opts: CallOptions::default(),
        }
    }
}

impl<T: HttpClient> ApiExt for T {}

/// Stateless call builder.
pub struct ApiCall<'a, C: HttpClient> {
    pub(crate) client: &'a C,
    pub(crate) base: Url,
    pub(crate) api_key: &'a str,
    pub(crate) opts: CallOptions,
}

impl<'a, C: HttpClient> ApiCall<'a, C> {
    /// Add an extra header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.opts.extra_headers.push((name, value));
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<SmolStr>) -> Self {
        self.opts.user_agent = Some(agent.into());
        self
    }

    /// Invoke `action` with `args` and return the payload of the envelope.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self, args)))]
    pub async fn send(self, action: &str, args: &ApiArgs) -> Result<ApiResponse> {
        let http_request = build_http_request(&self.base, action, self.api_key, args, &self.opts)?;

        let http_response = self
            .client
            .send_http(http_request)
            .await
            .map_err(TransportError::from_client)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            action,
            params = %redacted_params(args),
            status = %http_response.status(),
            body = %String::from_utf8_lossy(http_response.body()),
            "api exchange"
        );

        process_response(action, http_response)
    }
}

/// Flattened parameters with the credential left out, for logging.
pub fn redacted_params(args: &ApiArgs) -> String {
    args.to_form_pairs()
        .into_iter()
        .filter(|(k, _)| !RESERVED.contains(&k.as_str()))
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encode the form body: transport fields first, then every present argument.
///
/// Arguments named like a transport field are dropped.
pub fn encode_form(action: &str, api_key: &str, args: &ApiArgs) -> Result<String> {
    let mut pairs = vec![
        (SmolStr::new_static("api_action"), action.to_owned()),
        (SmolStr::new_static("api_key"), api_key.to_owned()),
    ];
    pairs.extend(
        args.to_form_pairs()
            .into_iter()
            .filter(|(k, _)| !RESERVED.contains(&k.as_str())),
    );
    serde_html_form::to_string(&pairs).map_err(|e| ClientError::from(EncodeError::from(e)))
}

/// Build the HTTP request for one action.
pub fn build_http_request(
    base: &Url,
    action: &str,
    api_key: &str,
    args: &ApiArgs,
    opts: &CallOptions,
) -> Result<Request<Vec<u8>>> {
    let body = encode_form(action, api_key, args)?;

    let mut builder = Request::builder()
        .method(http::Method::POST)
        .uri(base.as_str())
        .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .header(header::ACCEPT, "application/json");

    if let Some(agent) = &opts.user_agent {
        let hv = HeaderValue::from_str(agent)
            .map_err(|e| EncodeError::InvalidRequest(format!("Invalid user agent: {}", e)))?;
        builder = builder.header(header::USER_AGENT, hv);
    }
    for (name, value) in &opts.extra_headers {
        builder = builder.header(name, value);
    }

    builder
        .body(body.into_bytes())
        .map_err(|e| EncodeError::InvalidRequest(e.to_string()).into())
}

/// Turn a raw HTTP response into the payload of a successful call.
///
/// The HTTP status is only reported when the body is not an envelope.
#[inline]
pub fn process_response(action: &str, http_response: http::Response<Vec<u8>>) -> Result<ApiResponse> {
    let status = http_response.status();
    let envelope =
        Envelope::from_slice(http_response.body()).map_err(|source| ProtocolError {
            action: action.into(),
            status,
            source,
        })?;
    Ok(envelope.into_data()?)
}
