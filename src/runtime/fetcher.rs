use crate::config::AppConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` whatever its status code.
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, String>;

    /// Fetches `url`, treating a non-success status as an error.
    async fn fetch(&self, url: &str) -> Result<String, String> {
        let page = self.fetch_page(url).await?;
        if !page.is_success() {
            return Err(format!("HTTP error {} fetching {url}", page.status));
        }
        Ok(page.body)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Network error fetching {url}: {e}"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Error reading response body from {url}: {e}"))?;

        Ok(FetchedPage { status, body })
    }
}
