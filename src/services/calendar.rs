use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::parsers::next_page_token;
use crate::cache::Cache;
use crate::config::{AppConfig, CalendarSettings};
use crate::errors::parse_context;
use crate::http::HttpClient;
use crate::pagination::{PageIterator, PaginationConfig};

const EVENTS_API: &str = "https://www.googleapis.com/calendar/v3/calendars";
const PAGE_SIZE: usize = 250;

/// One entry of `events.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// RFC 3339 date-time, or `YYYY-MM-DD` for all-day events
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default = "manual_source")]
    pub source: String,
}

fn manual_source() -> String {
    "manual".to_string()
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    start: Option<EventTime>,
    end: Option<EventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl EventTime {
    fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

impl GoogleEvent {
    fn into_event(self) -> Option<CalendarEvent> {
        if self.status == "cancelled" {
            return None;
        }
        let start = self.start.as_ref()?;
        let all_day = start.date_time.is_none();

        Some(CalendarEvent {
            start: start.value()?.to_string(),
            end: self
                .end
                .as_ref()
                .and_then(EventTime::value)
                .unwrap_or_default()
                .to_string(),
            id: self.id,
            title: self.summary,
            location: self.location,
            description: self.description,
            all_day,
            source: "google".to_string(),
        })
    }
}

/// Items of one events-list response; cancelled and undated entries are dropped
pub fn parse_events_page(data: &Value) -> Result<Vec<CalendarEvent>> {
    let Some(items) = data.get("items") else {
        return Ok(Vec::new());
    };
    let items: Vec<GoogleEvent> =
        serde_json::from_value(items.clone()).with_context(|| parse_context("calendar events"))?;

    Ok(items.into_iter().filter_map(GoogleEvent::into_event).collect())
}

/// Manual events first, replaced by a calendar event with the same id; ordered by start
pub fn merge_events(google: Vec<CalendarEvent>, manual: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = manual
        .into_iter()
        .filter(|m| !google.iter().any(|g| g.id == m.id))
        .collect();
    events.extend(google);
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
    events
}

/// Copies the league calendar into `events.json`
pub struct CalendarService {
    client: HttpClient,
    settings: CalendarSettings,
    cache: Cache,
    events_key: &'static str,
    manual_events_key: &'static str,
}

impl CalendarService {
    /// Fails before any request when the credentials are not configured
    pub fn new(config: &AppConfig) -> Result<Self> {
        let settings = CalendarSettings::from_env()?;
        let client = HttpClient::new(&config.scraper.user_agent, config.scraper.timeout_secs)?;

        Ok(Self {
            client,
            settings,
            cache: Cache::new(&config.output.data_dir)?,
            events_key: config.output.events_key,
            manual_events_key: config.output.manual_events_key,
        })
    }

    pub async fn run(&self) -> Result<usize> {
        info!("=== Starting Calendar Sync ===");

        let google = self.fetch_events().await?;
        info!("  → {} calendar events", google.len());

        let manual: Vec<CalendarEvent> = self.cache.load(self.manual_events_key)?.unwrap_or_default();
        info!("  → {} manual events", manual.len());

        let events = merge_events(google, manual);
        self.cache.save(self.events_key, &events)?;

        info!("=== Calendar Sync Complete: {} events ===", events.len());
        Ok(events.len())
    }

    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>> {
        let config = PaginationConfig::new(PAGE_SIZE).with_max_pages(self.settings.max_pages);
        let mut pages = PageIterator::new(config);
        let mut events = Vec::new();

        while pages.has_more() {
            let url = self.build_url(pages.page_size(), pages.token());
            let data: Value = self.client.get_json(&url).await?;

            events.extend(parse_events_page(&data)?);
            pages.advance(next_page_token(&data));
            debug!("Fetched calendar page {}", pages.pages_fetched());
        }

        if pages.has_reached_max() && pages.token().is_some() {
            warn!("Stopped after {} calendar pages; later events were not fetched", pages.pages_fetched());
        }
        Ok(events)
    }

    fn build_url(&self, page_size: usize, token: Option<&str>) -> String {
        let url = format!(
            "{}/{}/events?key={}&singleEvents=true&orderBy=startTime&maxResults={}",
            EVENTS_API,
            urlencoding::encode(&self.settings.calendar_id),
            urlencoding::encode(&self.settings.api_key),
            page_size
        );
        match token {
            Some(token) => format!("{}&pageToken={}", url, urlencoding::encode(token)),
            None => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: &str, start: &str, source: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: format!("Event {}", id),
            start: start.to_string(),
            end: String::new(),
            location: String::new(),
            description: String::new(),
            all_day: false,
            source: source.to_string(),
        }
    }

    #[test]
    fn test_parse_events_page() {
        let page = json!({
            "items": [
                {"id": "a", "summary": "Ice Dogs vs Polar Bears", "location": "Rink 1",
                 "start": {"dateTime": "2026-01-10T20:00:00-05:00"}, "end": {"dateTime": "2026-01-10T21:15:00-05:00"}},
                {"id": "b", "summary": "Banquet", "start": {"date": "2026-04-02"}, "end": {"date": "2026-04-03"}},
                {"id": "c", "status": "cancelled"},
                {"id": "d", "summary": "No start"}
            ],
            "nextPageToken": "next"
        });

        let events = parse_events_page(&page).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Ice Dogs vs Polar Bears");
        assert_eq!(events[0].location, "Rink 1");
        assert!(!events[0].all_day);
        assert_eq!(events[1].start, "2026-04-02");
        assert!(events[1].all_day);
        assert_eq!(events[1].source, "google");
    }

    #[test]
    fn test_page_without_items_is_empty() {
        assert!(parse_events_page(&json!({"kind": "calendar#events"})).unwrap().is_empty());
    }

    #[test]
    fn test_merge_orders_by_start_and_prefers_calendar() {
        let google = vec![event("g1", "2026-03-01T19:00:00Z", "google"), event("shared", "2026-01-05", "google")];
        let manual = vec![event("m1", "2026-02-14", "manual"), event("shared", "2025-12-31", "manual")];

        let merged = merge_events(google, manual);

        let ids: Vec<_> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["shared", "m1", "g1"]);
        assert_eq!(merged[0].source, "google");
    }

    #[test]
    fn test_manual_event_defaults() {
        let parsed: CalendarEvent =
            serde_json::from_str(r#"{"id": "m", "title": "Skills clinic", "start": "2026-05-01"}"#).unwrap();
        assert_eq!(parsed.source, "manual");
        assert!(parsed.end.is_empty());
    }
}
