use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use crate::api::parsers::{DecodedSchedule, decode_schedule};
use crate::domain::SeasonKey;
use crate::errors::parse_context;
use crate::http::HttpClient;

/// Client for the league's schedule API
#[derive(Clone)]
pub struct ScheduleClient {
    client: HttpClient,
    api_url: String,
    league: String,
}

impl ScheduleClient {
    pub fn new(client: HttpClient, api_url: &str, league: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            league: league.to_string(),
        }
    }

    /// Fetch and decode one season's schedule
    pub async fn fetch_schedule(&self, key: &SeasonKey, club: &str) -> Result<DecodedSchedule> {
        let url = self.build_schedule_url(key);
        let data: Value = self.client.get_json(&url).await?;
        let records = Self::extract_records(data)?;

        let decoded = decode_schedule(records, club);
        info!(
            "  {}: {} games ({} skipped)",
            key,
            decoded.games.len(),
            decoded.skipped
        );
        Ok(decoded)
    }

    // --- Helper Methods ---

    fn build_schedule_url(&self, key: &SeasonKey) -> String {
        let url = format!(
            "{}?type=schedule&league={}&season={}",
            self.api_url,
            urlencoding::encode(&self.league),
            key.season.slug()
        );
        match key.year {
            Some(year) => format!("{}&year={}", url, year),
            None => url,
        }
    }

    fn extract_records(data: Value) -> Result<Vec<Value>> {
        match data {
            Value::Array(records) => Ok(records),
            Value::Null => Ok(Vec::new()),
            other => Err(anyhow::anyhow!("expected a JSON array, got {}", json_kind(&other)))
                .context(parse_context("schedule response")),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
