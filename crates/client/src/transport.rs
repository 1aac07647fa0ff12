//! HTTP transport bound to one server endpoint.
//!
//! Every call builds its own [`RequestSpec`]: the `Accept` header, query and
//! body travel with the request instead of living on the shared client, so a
//! single [`Transport`] can be cloned into as many tasks as needed.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode, Url};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Content types the interface speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    OctetStream,
    Json,
    PlainText,
}

impl MediaType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaType::OctetStream => "application/octet-stream",
            MediaType::Json => "application/json",
            MediaType::PlainText => "text/plain",
        }
    }
}

/// Integer query parameters, in the order they are sent.
pub type Query<'a> = &'a [(&'a str, i32)];

/// One request, fully described. Never stored on the transport.
#[derive(Debug, Clone)]
pub struct RequestSpec<'a> {
    pub method: Method,
    /// Endpoint path relative to the base URL, without a leading `/`.
    pub path: &'a str,
    pub query: Query<'a>,
    pub accept: MediaType,
    /// Plain-text body.
    pub body: Option<String>,
}

impl<'a> RequestSpec<'a> {
    pub fn get(path: &'a str, accept: MediaType) -> Self {
        Self {
            method: Method::GET,
            path,
            query: &[],
            accept,
            body: None,
        }
    }

    pub fn put_text(path: &'a str, body: String) -> Self {
        Self {
            method: Method::PUT,
            path,
            query: &[],
            accept: MediaType::PlainText,
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Query<'a>) -> Self {
        self.query = query;
        self
    }
}

/// Pooled HTTP client plus the base endpoint every path is resolved against.
///
/// Cloning is cheap: the connection pool is shared.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base: Url,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = config.parsed_base_url()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("building http client: {}", e)))?;
        Ok(Self::with_client(client, base))
    }

    /// Use an existing client, e.g. one shared with other parts of a program.
    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// GET binary data. Only 200 counts as success.
    pub async fn request_binary(&self, path: &str, query: Query<'_>) -> Result<Vec<u8>> {
        let spec = RequestSpec::get(path, MediaType::OctetStream).with_query(query);
        let response = expect_ok(self.send(spec).await?, path)?;
        Ok(response.bytes().await?.to_vec())
    }

    /// GET a JSON document as text. 404 is reported as
    /// [`Error::NotConfigured`]; any other non-200 as [`Error::Transport`].
    pub async fn request_json(&self, path: &str) -> Result<String> {
        let response = self.send(RequestSpec::get(path, MediaType::Json)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!("/{} is not configured on the server", path);
            return Err(Error::NotConfigured {
                path: path.to_string(),
            });
        }
        let response = expect_ok(response, path)?;
        Ok(response.text().await?)
    }

    /// PUT a plain-text body and return the plain-text reply.
    pub async fn request_text_put(&self, path: &str, query: Query<'_>, body: String) -> Result<String> {
        let spec = RequestSpec::put_text(path, body).with_query(query);
        let response = expect_ok(self.send(spec).await?, path)?;
        Ok(response.text().await?)
    }

    /// Issue one request exactly as described. Does not look at the status.
    pub async fn send(&self, spec: RequestSpec<'_>) -> Result<Response> {
        let url = self.endpoint(spec.path)?;
        tracing::debug!("{} /{} {:?} (accept {})", spec.method, spec.path, spec.query, spec.accept.as_str());

        let mut request = self
            .client
            .request(spec.method, url)
            .header(ACCEPT, spec.accept.as_str())
            .query(spec.query);
        if let Some(body) = spec.body {
            request = request
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(body);
        }
        Ok(request.send().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("endpoint `{}`: {}", path, e)))
    }
}

/// Turn anything but 200 into [`Error::Transport`].
fn expect_ok(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("/{} answered {}", path, status);
        return Err(Error::Transport {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }
    Ok(response)
}
