#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use http::StatusCode;
use linode::{ClientOptions, LinodeClient};
use linode_common::error::TransportError;
use linode_common::http_client::HttpClient;
use tokio::sync::Mutex;
use url::Url;

pub const API_KEY: &str = "foo";

#[derive(Clone, Default)]
pub struct MockClient {
    queue: Arc<Mutex<VecDeque<http::Response<Vec<u8>>>>>,
    log: Arc<Mutex<Vec<http::Request<Vec<u8>>>>>,
}

impl MockClient {
    pub async fn push(&self, resp: http::Response<Vec<u8>>) {
        self.queue.lock().await.push_back(resp);
    }

    /// Queue a 200 response with `body`.
    pub async fn push_json(&self, body: &str) {
        self.push(response(StatusCode::OK, body)).await;
    }

    pub async fn request_count(&self) -> usize {
        self.log.lock().await.len()
    }

    /// Decoded form bodies of every request sent so far.
    pub async fn forms(&self) -> Vec<BTreeMap<String, String>> {
        self.log
            .lock()
            .await
            .iter()
            .map(|req| {
                url::form_urlencoded::parse(req.body())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .collect()
    }

    /// Value of header `name` on request `index`.
    pub async fn header(&self, index: usize, name: http::header::HeaderName) -> Option<String> {
        let log = self.log.lock().await;
        log.get(index)?
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    /// Form body of the only request sent.
    pub async fn single_form(&self) -> BTreeMap<String, String> {
        let mut forms = self.forms().await;
        assert_eq!(forms.len(), 1, "expected exactly one request");
        forms.remove(0)
    }
}

impl HttpClient for MockClient {
    type Error = std::convert::Infallible;
    fn send_http(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl core::future::Future<
        Output = core::result::Result<http::Response<Vec<u8>>, Self::Error>,
    > + Send {
        let log = self.log.clone();
        let queue = self.queue.clone();
        async move {
            log.lock().await.push(request);
            Ok(queue.lock().await.pop_front().expect("no queued response"))
        }
    }
}

/// Transport that fails every request with a clone of `error`.
#[derive(Clone)]
pub struct DownClient {
    error: fn() -> TransportError,
    attempts: Arc<AtomicUsize>,
}

impl DownClient {
    pub fn new(error: fn() -> TransportError) -> Self {
        Self {
            error,
            attempts: Arc::default(),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl HttpClient for DownClient {
    type Error = TransportError;

    async fn send_http(
        &self,
        _request: http::Request<Vec<u8>>,
    ) -> core::result::Result<http::Response<Vec<u8>>, Self::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err((self.error)())
    }
}

pub fn response(status: StatusCode, body: &str) -> http::Response<Vec<u8>> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.as_bytes().to_vec())
        .unwrap()
}

pub fn client(mock: &MockClient) -> LinodeClient<MockClient> {
    let options = ClientOptions::new()
        .base_url(Url::parse("http://api.mock/").unwrap())
        .build();
    LinodeClient::with_http(mock.clone(), API_KEY, options)
}

/// Assert that `form` holds exactly the transport fields for `action` plus
/// `params`.
pub fn assert_form(form: &BTreeMap<String, String>, action: &str, params: &[(&str, &str)]) {
    let mut expected: BTreeMap<String, String> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    expected.insert("api_action".into(), action.into());
    expected.insert("api_key".into(), API_KEY.into());
    assert_eq!(form, &expected);
}
