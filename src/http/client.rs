use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Listing endpoint for the open-data plenary protocols of the current period
pub const DEFAULT_LISTING_URL: &str =
    "https://www.bundestag.de/ajax/filterlist/de/services/opendata/543410-543410";

/// Base that relative links on listing pages are resolved against
pub const DEFAULT_LINK_BASE: &str = "https://www.bundestag.de";

/// Configuration for the upstream HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Paginated listing endpoint
    pub listing_url: String,
    /// Value of the `limit` query parameter
    pub page_size: usize,
    /// Headers sent with every request
    pub headers: Vec<(String, String)>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            page_size: 10,
            headers: default_headers(),
        }
    }
}

impl HttpConfig {
    /// Create config from environment variables
    ///
    /// `PARLACORPUS_LISTING_URL` replaces the listing endpoint and
    /// `PARLACORPUS_COOKIE` adds a session cookie header; both are optional.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PARLACORPUS_LISTING_URL") {
            config.listing_url = url;
        }
        if let Ok(cookie) = std::env::var("PARLACORPUS_COOKIE") {
            config.headers.push(("cookie".to_string(), cookie));
        }

        config
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name: {name}"))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {name}"))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

fn default_headers() -> Vec<(String, String)> {
    [
        ("accept", "*/*"),
        (
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/86.0.4240.75 Safari/537.36",
        ),
        ("x-requested-with", "XMLHttpRequest"),
        ("sec-fetch-site", "same-origin"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-dest", "empty"),
        ("referer", "https://www.bundestag.de/services/opendata"),
        ("accept-language", "de-DE,de;q=0.9,en-US;q=0.8,en;q=0.7"),
        ("dnt", "1"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

/// A paginated listing of transcript links
pub trait ListingSource {
    /// Fetch the raw HTML of the listing page starting at `offset`
    fn fetch_listing(&self, offset: usize) -> impl Future<Output = Result<String>> + Send;
}

/// A source of transcript documents
pub trait DocumentSource {
    /// Fetch the raw document behind `url`
    fn fetch_document(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP client for the parliament's open-data endpoints
pub struct BundestagClient {
    client: Client,
    config: HttpConfig,
}

impl BundestagClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(config.header_map()?)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn get_text(&self, request: reqwest::RequestBuilder, what: &str) -> Result<String> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request for {what}"))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("HTTP error for {}: {}", what, status);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {what}"))
    }
}

impl ListingSource for BundestagClient {
    async fn fetch_listing(&self, offset: usize) -> Result<String> {
        let request = self.client.get(&self.config.listing_url).query(&[
            ("limit", self.config.page_size.to_string()),
            ("noFilterSet", "true".to_string()),
            ("offset", offset.to_string()),
        ]);

        self.get_text(request, &format!("listing page at offset {offset}"))
            .await
    }
}

impl DocumentSource for BundestagClient {
    async fn fetch_document(&self, url: &str) -> Result<String> {
        self.get_text(self.client.get(url), url).await
    }
}
