// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use snm_insight_ticker::services::{CompletionRequest, CompletionService, TickerSearchService};
use snm_insight_ticker::{InsightClient, InsightConfig, InsightError, ResolvedTicker};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn ticker(symbol: &str, name: &str, exchange: &str) -> ResolvedTicker {
    ResolvedTicker {
        symbol: symbol.to_string(),
        name: name.to_string(),
        currency: Some("USD".to_string()),
        stock_exchange: Some(format!("{} Exchange", exchange)),
        exchange_short_name: exchange.to_string(),
    }
}

fn transport_error(service: &'static str) -> InsightError {
    InsightError::Api {
        service,
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// Completion service that replies with a canned text or fails.
pub struct FakeCompletion {
    reply: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().ok_or_else(|| transport_error("OpenAI"))
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

enum SearchReply {
    Results(Vec<ResolvedTicker>),
    Failure,
}

/// Search service keyed by exact query text. Unknown queries return no results.
#[derive(Default)]
pub struct FakeSearch {
    replies: HashMap<String, SearchReply>,
    delays: HashMap<String, Duration>,
    pub queries: Mutex<Vec<(String, usize)>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, results: Vec<ResolvedTicker>) -> Self {
        self.replies
            .insert(query.to_string(), SearchReply::Results(results));
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.replies.insert(query.to_string(), SearchReply::Failure);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl TickerSearchService for FakeSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ResolvedTicker>, InsightError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), limit));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.replies.get(query) {
            Some(SearchReply::Results(results)) => Ok(results.clone()),
            Some(SearchReply::Failure) => Err(transport_error("FMP")),
            None => Ok(Vec::new()),
        }
    }
}

pub fn test_config() -> InsightConfig {
    InsightConfig::new("sk-test".to_string(), "fmp-test".to_string())
}

pub fn client(completion: Arc<FakeCompletion>, search: Arc<FakeSearch>) -> InsightClient {
    InsightClient::new(completion, search, &test_config())
}
