use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};

use crate::config::DocsConfig;

/// Raw response body plus status, as returned by [`Fetcher::fetch`].
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub body: String,
    pub status: u16,
}

/// Failure modes of a documentation fetch.
///
/// No retry happens here; the error propagates to the caller, who decides
/// whether a failed fetch is worth repeating.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP GET against the documentation pages with a fixed default header set.
///
/// Holds one reqwest client; the client is reentrant, so one `Fetcher` can
/// serve concurrent queries.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    config: DocsConfig,
}

impl Fetcher {
    pub fn new(config: DocsConfig) -> Self {
        Fetcher {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// GET a documentation page with the default header set.
    pub async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        self.fetch_with_headers(url, &[]).await
    }

    /// GET with caller-supplied headers merged over the defaults.
    pub async fn fetch_with_headers(
        &self,
        url: &str,
        overrides: &[(&str, &str)],
    ) -> Result<RawDocument, FetchError> {
        let headers = build_headers(&self.config, overrides);

        let response = self
            .client
            .get(url)
            .headers(headers)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status().as_u16();
        ensure_success(url, status)?;

        let body = response.text().await.map_err(|e| request_error(url, e))?;

        Ok(RawDocument { body, status })
    }
}

/// Merge the default header set with caller overrides; overrides win.
/// Override entries that do not form valid header names/values are skipped.
fn build_headers(config: &DocsConfig, overrides: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
        headers.insert(USER_AGENT, value);
    }
    if let Ok(value) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, value);
    }

    for (name, value) in overrides {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        let Ok(value) = HeaderValue::from_str(value) else {
            continue;
        };
        headers.insert(name, value);
    }

    headers
}

/// Reject non-2xx statuses. Split out of the request path so the mapping is
/// testable without a live server.
fn ensure_success(url: &str, status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        })
    }
}

/// Map a transport-level reqwest failure onto the fetch taxonomy.
fn request_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Connection {
            url: url.to_string(),
            source: err,
        }
    }
}
