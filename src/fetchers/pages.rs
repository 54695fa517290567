use anyhow::Result;
use log::debug;

use crate::domain::SeasonKey;
use crate::html::reattach_detached_bodies;
use crate::http::HttpClient;

/// Fetches the server-rendered pages of one season
#[derive(Clone)]
pub struct PageFetcher {
    client: HttpClient,
    base_url: String,
}

impl PageFetcher {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// HTML of `<base>/<season>/<page>`, with `?year=` for archived seasons.
    /// Table bodies written after their table are moved back inside it.
    pub async fn fetch_page(&self, key: &SeasonKey, page: &str) -> Result<String> {
        let url = build_url(&self.base_url, key, page);
        let body = self.client.get_text(&url).await?;
        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(reattach_detached_bodies(&body).into_owned())
    }
}

pub fn build_url(base_url: &str, key: &SeasonKey, page: &str) -> String {
    let url = format!("{}/{}/{}", base_url, key.season.slug(), page);
    match key.year {
        Some(year) => format!("{}?year={}", url, year),
        None => url,
    }
}
