// src/services/ticker_search.rs
use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::types::ResolvedTicker;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Symbol search endpoint. Returns entries in the order the service ranked them.
#[async_trait]
pub trait TickerSearchService: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ResolvedTicker>, InsightError>;
}

pub struct FmpClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchBody {
    List(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl FmpClient {
    pub fn new(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &InsightConfig, client: Client) -> Self {
        Self::new(config.fmp_api_key.clone(), config.fmp_base_url.clone(), client)
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/v3/search?query={}&limit={}&apikey={}",
            self.base_url,
            urlencoding::encode(query),
            limit,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl TickerSearchService for FmpClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ResolvedTicker>, InsightError> {
        // The URL carries the api key, so it must not end up in error messages.
        let response = self
            .client
            .get(self.search_url(query, limit))
            .send()
            .await
            .map_err(|e| InsightError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Api {
                service: "FMP",
                status: status.as_u16(),
                body,
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| InsightError::Request(e.without_url()))?;
        parse_search_body(&raw)
    }
}

/// Entries that do not fit `ResolvedTicker` (null name, missing exchange, ...)
/// are skipped so the rest of the list can still match.
pub fn parse_search_body(raw: &str) -> Result<Vec<ResolvedTicker>, InsightError> {
    let items = match serde_json::from_str::<SearchBody>(raw)? {
        SearchBody::List(items) => items,
        SearchBody::Wrapped { data } => data,
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match ResolvedTicker::deserialize(&item) {
            Ok(ticker) => Some(ticker),
            Err(e) => {
                debug!("skipping search entry {}: {}", item, e);
                None
            }
        })
        .collect())
}
