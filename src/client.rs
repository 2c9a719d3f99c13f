// src/client.rs
use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::services::{CompletionService, FmpClient, OpenAiClient, TickerSearchService};
use crate::symbols::RegionExchanges;
use crate::tools::{Extractor, Resolver};
use crate::types::{Candidate, InsightOutcome, Region, RequestContext, ResolvedTicker};
use log::{error, info, warn};
use reqwest::Client;
use std::sync::Arc;

/// Entry point for one insight submission: extraction, then resolution.
#[derive(Clone)]
pub struct InsightClient {
    extractor: Extractor,
    resolver: Resolver,
    model: String,
}

impl InsightClient {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        search: Arc<dyn TickerSearchService>,
        config: &InsightConfig,
    ) -> Self {
        Self {
            extractor: Extractor::new(completion),
            resolver: Resolver::new(search, config.regions.clone(), config.search_limit),
            model: config.model.clone(),
        }
    }

    /// Wires the OpenAI and FMP clients over one shared HTTP client.
    pub fn from_config(config: &InsightConfig) -> Result<Self, InsightError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let completion = Arc::new(OpenAiClient::from_config(config, http.clone()));
        let search = Arc::new(FmpClient::from_config(config, http));
        Ok(Self::new(completion, search, config))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn regions(&self) -> &RegionExchanges {
        self.resolver.regions()
    }

    pub async fn submit_insight(
        &self,
        free_text: &str,
        language_hint: &str,
        region: Region,
    ) -> InsightOutcome {
        let ctx = RequestContext::new();
        self.submit_insight_with_context(&ctx, free_text, language_hint, region)
            .await
    }

    /// Every failure collapses into `InsightOutcome::Empty`; details only go
    /// to the log under the request id.
    pub async fn submit_insight_with_context(
        &self,
        ctx: &RequestContext,
        free_text: &str,
        language_hint: &str,
        region: Region,
    ) -> InsightOutcome {
        info!("[{}] submitting insight: region={} language={}", ctx, region, language_hint);

        if free_text.trim().is_empty() {
            warn!("[{}] empty insight, nothing to extract", ctx);
            return InsightOutcome::Empty;
        }

        let candidates = match self.extract(ctx, language_hint, free_text).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("[{}] extraction failed, returning empty result: {}", ctx, e);
                return InsightOutcome::Empty;
            }
        };

        if candidates.is_empty() {
            warn!("[{}] extractor found no candidates", ctx);
            return InsightOutcome::Empty;
        }

        self.resolver.resolve_all(ctx, &candidates, region).await
    }

    pub async fn extract(
        &self,
        ctx: &RequestContext,
        language_hint: &str,
        free_text: &str,
    ) -> Result<Vec<Candidate>, InsightError> {
        self.extractor
            .extract(ctx, &self.model, language_hint, free_text)
            .await
    }

    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        candidate: &Candidate,
        region: Region,
    ) -> Option<ResolvedTicker> {
        self.resolver.resolve_one(ctx, candidate, region).await
    }

    pub async fn resolve_all(
        &self,
        ctx: &RequestContext,
        candidates: &[Candidate],
        region: Region,
    ) -> InsightOutcome {
        self.resolver.resolve_all(ctx, candidates, region).await
    }
}
