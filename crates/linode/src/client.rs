//! The stateful API client.

use std::fmt;

use linode_common::call::ApiExt;
use linode_common::http_client::HttpClient;
use linode_common::{ApiArgs, ApiResponse, BASE_URL, Result, ToArgs};
use smol_str::SmolStr;
use url::Url;

fn default_base_url() -> Url {
    Url::parse(BASE_URL).expect("valid url")
}

/// Client configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
#[builder(start_fn = new)]
pub struct ClientOptions {
    /// Endpoint every action is posted to
    #[builder(default = default_base_url())]
    pub base_url: Url,
    /// `User-Agent` header sent with every request
    #[builder(into)]
    pub user_agent: Option<SmolStr>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

/// Client for the classic API.
///
/// Holds the endpoint, the API key and the HTTP transport. None of these
/// change after construction, so a shared reference can issue calls from
/// several tasks at once.
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> miette::Result<()> {
/// use linode::LinodeClient;
///
/// let client = LinodeClient::new("my-api-key");
/// client.test_echo().await?;
/// for dc in client.avail_datacenters().await? {
///     println!("{} {}", dc.id, dc.location);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LinodeClient<C> {
    http: C,
    api_key: SmolStr,
    options: ClientOptions,
}

#[cfg(feature = "reqwest-client")]
impl LinodeClient<reqwest::Client> {
    /// Client for the public endpoint over a default `reqwest` client.
    pub fn new(api_key: impl Into<SmolStr>) -> Self {
        Self::with_http(reqwest::Client::new(), api_key, ClientOptions::default())
    }
}

impl<C: HttpClient> LinodeClient<C> {
    /// Client over any [`HttpClient`].
    pub fn with_http(http: C, api_key: impl Into<SmolStr>, options: ClientOptions) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(base_url = %options.base_url, "creating linode client");
        Self {
            http,
            api_key: api_key.into(),
            options,
        }
    }

    /// Endpoint in use.
    pub fn base_url(&self) -> &Url {
        &self.options.base_url
    }

    /// Configuration in use.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Underlying transport.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Invoke `action` with `args`.
    ///
    /// This is the single entry point every typed operation goes through.
    pub async fn call(&self, action: &str, args: &ApiArgs) -> Result<ApiResponse> {
        let mut call = self.http.api(self.options.base_url.clone(), &self.api_key);
        if let Some(agent) = &self.options.user_agent {
            call = call.user_agent(agent.clone());
        }
        call.send(action, args).await
    }

    /// Invoke `action` with an options structure merged under `args`.
    ///
    /// Keys in `args` win over keys produced by `opts`. A malformed options
    /// structure fails before anything is sent.
    pub async fn call_with<O: ToArgs>(
        &self,
        action: &str,
        opts: &O,
        args: ApiArgs,
    ) -> Result<ApiResponse> {
        let mut merged = opts.to_args()?;
        merged.extend(args);
        self.call(action, &merged).await
    }
}

impl<C> fmt::Debug for LinodeClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinodeClient")
            .field("base_url", &self.options.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.options.user_agent)
            .finish_non_exhaustive()
    }
}
