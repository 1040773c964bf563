//! # Fetching Endpoint Payloads
//!
//! [`Fetcher`] is the seam between the inspection loop and the network. The
//! production implementation, [`HttpFetcher`], issues one blocking GET per call;
//! tests substitute recorders that never touch a socket.
//!
//! The HTTP status is not inspected: error pages are handed to the renderer like
//! any other body, and only transport failures are errors.

use crate::endpoints::EndpointDescriptor;
use crate::error::{Error, FetchError, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

pub trait Fetcher {
    /// Retrieves the full body at `url`.
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;

    /// Retrieves `path_suffix` from the endpoint serving `app`.
    fn fetch_endpoint(
        &self,
        endpoint: &EndpointDescriptor,
        app: &str,
        path_suffix: &str,
    ) -> std::result::Result<Vec<u8>, FetchError> {
        self.fetch(&endpoint.url(app, path_suffix))
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher. `timeout` of `None` lets a request wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        debug!(url, status = %response.status(), "received response");

        let body = response.bytes().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}
