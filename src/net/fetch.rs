use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::config::{Config, REQUEST_TIMEOUT};
use crate::dom::parser::extract_links;
use crate::dom::LinkList;

/// The page could not be fetched.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything that can produce the stream links published at a URL.
///
/// An empty list means the page loaded but had no matching anchors.
pub trait LinkSource {
    fn fetch(&self, url: &str) -> Result<LinkList, NetworkError>;
}

/// Fetches a page over HTTP (blocking) and extracts its stream links.
pub struct LinkFetcher {
    client: Client,
    scheme: String,
}

impl LinkFetcher {
    pub fn new(config: &Config) -> Result<Self, NetworkError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(concat!(
                "Mozilla/5.0 (compatible; acestream-links/",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(NetworkError::Client)?;

        Ok(Self {
            client,
            scheme: config.link_scheme.clone(),
        })
    }

    /// Fetch `url` and return the raw HTML body (non-2xx is an error).
    pub fn fetch_page(&self, url: &str) -> Result<String, NetworkError> {
        let parsed = Url::parse(url).map_err(|source| NetworkError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed.as_str())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .map_err(|source| NetworkError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().map_err(|source| NetworkError::Body {
            url: url.to_string(),
            source,
        })
    }
}

impl LinkSource for LinkFetcher {
    fn fetch(&self, url: &str) -> Result<LinkList, NetworkError> {
        let html = self.fetch_page(url)?;
        let links = extract_links(&html, &self.scheme);
        log::debug!("Found {} stream links at {}", links.len(), url);
        Ok(links)
    }
}
