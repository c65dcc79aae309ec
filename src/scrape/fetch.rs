use std::time::Duration;

use reqwest::blocking::Client;

use super::error::FetchError;

/// How long a single GET may block before it is abandoned.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw body behind a URL.
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher. One GET per call, no retries.
///
/// Must not be created or dropped on an async runtime thread.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<HttpFetcher, FetchError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<HttpFetcher, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send()?;
        // The body is scraped whatever the status code.
        log::debug!("GET {url} -> {}", response.status());
        Ok(response.bytes()?.to_vec())
    }
}
