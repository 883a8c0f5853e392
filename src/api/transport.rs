//! HTTP transport used by the API client.
//!
//! The catalog client only ever needs "GET this URL, optionally with a
//! bearer token, and give me the JSON body". [`Transport`] captures that so
//! the client can run against [`HttpTransport`] in production and a canned
//! transport in tests.

use std::future::Future;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{PlayerError, Result};

/// A GET-only JSON transport.
pub trait Transport: Send + Sync {
    /// GET `url` and parse the body as JSON.
    ///
    /// When `bearer` is set it is sent as `Authorization: Bearer <bearer>`.
    /// Non-2xx responses are not errors here: the catalog API reports its
    /// failures in the body.
    fn get_json(
        &self,
        url: &str,
        bearer: Option<&str>,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport sending the given user agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| PlayerError::TransportError(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                let preview: String = text.chars().take(200).collect();
                error!("Failed to parse response from {} (status {}): {}", url, status, preview);
                Err(PlayerError::ParseError(e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Canned transport for tests.

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::Value;

    use super::Transport;
    use crate::error::{PlayerError, Result};

    #[derive(Debug, Clone)]
    enum Reply {
        Json(Value),
        Unreachable(String),
        Malformed(String),
    }

    #[derive(Debug, Clone)]
    struct Route {
        reply: Reply,
        delay: Duration,
    }

    /// A recorded request.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Call {
        pub url: String,
        pub bearer: Option<String>,
    }

    #[derive(Debug, Default)]
    struct Inner {
        routes: HashMap<String, Route>,
        calls: Vec<Call>,
    }

    /// Transport answering from a URL → reply table and recording calls.
    ///
    /// Clones share the same table, so a test can keep one handle while the
    /// player owns another.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct MockTransport {
        inner: Arc<Mutex<Inner>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        fn route(&self, url: &str, reply: Reply, delay: Duration) -> &Self {
            self.inner
                .lock()
                .unwrap()
                .routes
                .insert(url.to_string(), Route { reply, delay });
            self
        }

        /// Answer `url` with `body`.
        pub(crate) fn respond(&self, url: &str, body: Value) -> &Self {
            self.route(url, Reply::Json(body), Duration::ZERO)
        }

        /// Answer `url` with `body` after `delay`.
        pub(crate) fn respond_after(&self, url: &str, body: Value, delay: Duration) -> &Self {
            self.route(url, Reply::Json(body), delay)
        }

        /// Fail `url` as if the host could not be reached.
        pub(crate) fn unreachable(&self, url: &str) -> &Self {
            self.route(url, Reply::Unreachable(url.to_string()), Duration::ZERO)
        }

        /// Answer `url` with a body that is not JSON.
        pub(crate) fn malformed(&self, url: &str, body: &str) -> &Self {
            self.route(url, Reply::Malformed(body.to_string()), Duration::ZERO)
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.inner.lock().unwrap().calls.clone()
        }

        pub(crate) fn call_count(&self) -> usize {
            self.inner.lock().unwrap().calls.len()
        }
    }

    impl Transport for MockTransport {
        async fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value> {
            let route = {
                let mut inner = self.inner.lock().unwrap();
                inner.calls.push(Call {
                    url: url.to_string(),
                    bearer: bearer.map(str::to_string),
                });
                inner.routes.get(url).cloned()
            };

            let Some(route) = route else {
                return Err(PlayerError::TransportError(format!("no route for {}", url)));
            };

            if !route.delay.is_zero() {
                tokio::time::sleep(route.delay).await;
            }

            match route.reply {
                Reply::Json(value) => Ok(value),
                Reply::Unreachable(host) => Err(PlayerError::TransportError(format!(
                    "connection refused: {}",
                    host
                ))),
                Reply::Malformed(body) => Ok(serde_json::from_str(&body)?),
            }
        }
    }
}
