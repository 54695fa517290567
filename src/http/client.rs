use crate::errors::fetch_context;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client shared by every fetcher. Cloning is cheap and clones share
/// one connection pool, so concurrent season fetches can each hold one.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// Fetch a page body as text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send_get_request(url).await?;
        Self::check_response_status(&response, url)?;
        response
            .text()
            .await
            .with_context(|| fetch_context(url))
    }

    /// Fetch and deserialize a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send_get_request(url).await?;
        Self::check_response_status(&response, url)?;
        response
            .json()
            .await
            .with_context(|| format!("Response from {} is not valid JSON", url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))
    }

    fn check_response_status(response: &reqwest::Response, url: &str) -> Result<()> {
        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} from {}", response.status(), url);
        }
        Ok(())
    }
}
