// src/tools/resolve.rs - Company-name-then-ticker lookup with region filtering
use crate::error::InsightError;
use crate::services::TickerSearchService;
use crate::symbols::RegionExchanges;
use crate::types::{Candidate, InsightOutcome, Region, RequestContext, ResolvedTicker};
use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;

#[derive(Clone)]
pub struct Resolver {
    search: Arc<dyn TickerSearchService>,
    regions: RegionExchanges,
    limit: usize,
}

impl Resolver {
    pub fn new(search: Arc<dyn TickerSearchService>, regions: RegionExchanges, limit: usize) -> Self {
        Self {
            search,
            regions,
            limit,
        }
    }

    pub fn regions(&self) -> &RegionExchanges {
        &self.regions
    }

    /// Tries the company name first, then the (possibly partial) ticker text.
    /// Each stage fails independently; a failed stage counts as no match.
    pub async fn resolve_one(
        &self,
        ctx: &RequestContext,
        candidate: &Candidate,
        region: Region,
    ) -> Option<ResolvedTicker> {
        let stages = [
            ("company", candidate.company.as_str()),
            ("ticker", candidate.ticker.as_str()),
        ];

        for (stage, term) in stages {
            if term.trim().is_empty() {
                debug!("[{}] skipping {} lookup: empty search term", ctx, stage);
                continue;
            }

            match self.lookup(term, region).await {
                Ok(Some(ticker)) => {
                    info!(
                        "[{}] resolved {:?} via {} search -> {} ({})",
                        ctx, term, stage, ticker.symbol, ticker.exchange_short_name
                    );
                    return Some(ticker);
                }
                Ok(None) => {
                    debug!("[{}] no {} match for {:?} by {}", ctx, region, term, stage);
                }
                Err(e) => {
                    warn!("[{}] {} search for {:?} failed: {}", ctx, stage, term, e);
                }
            }
        }

        info!(
            "[{}] no ticker in region {} for candidate {}/{}",
            ctx, region, candidate.ticker, candidate.company
        );
        None
    }

    /// Resolves every candidate concurrently and waits for all of them.
    /// Output follows candidate order, not completion order.
    pub async fn resolve_all(
        &self,
        ctx: &RequestContext,
        candidates: &[Candidate],
        region: Region,
    ) -> InsightOutcome {
        let lookups = candidates
            .iter()
            .map(|candidate| self.resolve_one(ctx, candidate, region));
        let settled: Vec<Option<ResolvedTicker>> = join_all(lookups).await;

        let tickers: Vec<ResolvedTicker> = settled.into_iter().flatten().collect();
        if tickers.is_empty() {
            warn!("[{}] no ticker symbols found for {} candidate(s)", ctx, candidates.len());
        } else {
            info!(
                "[{}] resolved {}/{} candidate(s)",
                ctx,
                tickers.len(),
                candidates.len()
            );
        }
        InsightOutcome::from_tickers(tickers)
    }

    async fn lookup(
        &self,
        query: &str,
        region: Region,
    ) -> Result<Option<ResolvedTicker>, InsightError> {
        let results = self.search.search(query, self.limit).await?;
        Ok(first_in_region(results, &self.regions, region))
    }
}

/// First entry, in service order, whose exchange belongs to the region.
pub fn first_in_region(
    results: Vec<ResolvedTicker>,
    regions: &RegionExchanges,
    region: Region,
) -> Option<ResolvedTicker> {
    results
        .into_iter()
        .find(|item| regions.contains(region, &item.exchange_short_name))
}
