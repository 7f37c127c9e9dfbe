use crate::options::{PendingRequest, RequestOption};
use crate::{ClientError, Result};
use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use typesense_core::{ClientConfig, HealthStatus};

/// Crate version, used in the default user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-typesense-api-key";

/// Debug logging callback, called once per request
pub type DebugHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Typesense REST API Client
///
/// All settings are fixed at construction, so a `Client` can be cloned and
/// shared across tasks freely.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: HeaderValue,
    user_agent: HeaderValue,
    client: HttpClient,
    debug: DebugHook,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`]
pub struct ClientBuilder {
    base_url: String,
    api_key: String,
    user_agent: Option<String>,
    client: Option<HttpClient>,
    debug: Option<DebugHook>,
}

impl ClientBuilder {
    /// Override the default `typesense-rs/<version>` user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured HTTP client (proxy, TLS, timeouts)
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn debug_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.debug = Some(Arc::new(hook));
        self
    }

    /// Build the client and check the server is reachable.
    ///
    /// Fails with the health check's error; no client is returned in that case.
    pub async fn build(self) -> Result<Client> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("typesense-rs/{}", VERSION));
        let mut api_key = HeaderValue::from_str(&self.api_key)?;
        api_key.set_sensitive(true);

        let client = Client {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            user_agent: HeaderValue::from_str(&user_agent)?,
            client: self.client.unwrap_or_default(),
            debug: self.debug.unwrap_or_else(noop_hook),
        };

        // Only reachability matters here, not the reported status
        let ok = client.health().await?;
        if !ok {
            tracing::warn!(base_url = %client.base_url, "typesense reports unhealthy");
        }

        Ok(client)
    }
}

impl Client {
    /// Create a client for `base_url` and ping the server.
    pub async fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::builder(base_url, api_key).build().await
    }

    pub fn builder(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user_agent: None,
            client: None,
            debug: None,
        }
    }

    /// Create a client from a loaded configuration
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut http = HttpClient::builder();
        if config.insecure_skip_verify {
            http = http.danger_accept_invalid_certs(true);
        }
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            http = http.connect_timeout(Duration::from_secs(secs));
        }

        let mut builder = Self::builder(&config.url, &config.api_key).http_client(http.build()?);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        builder.build().await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.to_str().unwrap_or_default()
    }

    /// Health check
    pub async fn health(&self) -> Result<bool> {
        let body = self.request(Method::GET, "/health", Vec::new()).await?;
        let status: HealthStatus = serde_json::from_slice(&body)?;
        Ok(status.ok)
    }

    /// Send one request and return the response body.
    ///
    /// A 400 response is returned as a body rather than an error; its
    /// `{"message": ...}` payload is left to the caller.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: Vec<RequestOption<'_>>,
    ) -> Result<Vec<u8>> {
        (self.debug)(&format!("Request to {} ({})", path, method));
        tracing::debug!(%method, path, "typesense request");

        let url = self.url_for(path)?;
        let mut req = PendingRequest::new(method, url);
        for opt in opts {
            opt(&mut req)?;
        }

        req.headers.insert(USER_AGENT, self.user_agent.clone());
        req.headers
            .insert(HeaderName::from_static(API_KEY_HEADER), self.api_key.clone());

        let mut builder = self
            .client
            .request(req.method, req.url)
            .headers(req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), path, bytes = body.len(), "typesense response");

        classify(status, body.to_vec())
    }

    /// Join `path` onto the base URL one segment at a time, percent-encoding
    /// each so that `?`, `#` or spaces in an id stay inside its segment.
    /// `.` and `..` are refused: URL parsing would resolve them against the
    /// base and address a different resource.
    fn url_for(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?;
            segments.pop_if_empty();
            for segment in path.trim_start_matches('/').split('/') {
                if segment == "." || segment == ".." {
                    return Err(ClientError::DotSegment(segment.to_string()));
                }
                segments.push(segment);
            }
        }
        Ok(url)
    }
}

fn noop_hook() -> DebugHook {
    Arc::new(|_: &str| {})
}

/// Map a response status onto the client's error kinds.
fn classify(status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>> {
    match status {
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(body),
        StatusCode::BAD_REQUEST => Ok(body),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::CONFLICT => Err(ClientError::AlreadyExists),
        StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::Unprocessable),
        StatusCode::SERVICE_UNAVAILABLE => Err(ClientError::Unavailable),
        other => Err(ClientError::Status {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or_default().to_string(),
        }),
    }
}
