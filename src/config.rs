// src/config.rs
use crate::symbols::RegionExchanges;
use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/api";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Clone, Debug)]
pub struct InsightConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub fmp_api_key: String,
    pub fmp_base_url: String,
    pub search_limit: usize,
    pub timeout: Duration,
    pub regions: RegionExchanges,
}

impl InsightConfig {
    pub fn new(openai_api_key: String, fmp_api_key: String) -> Self {
        Self {
            openai_api_key,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            fmp_api_key,
            fmp_base_url: DEFAULT_FMP_BASE_URL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            timeout: Duration::from_secs(60),
            regions: RegionExchanges::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        let fmp_api_key = env::var("FMP_API_KEY")
            .map_err(|_| anyhow!("FMP_API_KEY environment variable not set"))?;

        let regions = RegionExchanges::from_env()?;

        Ok(Self {
            openai_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            fmp_api_key,
            fmp_base_url: env::var("FMP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FMP_BASE_URL.to_string()),
            search_limit: env::var("SEARCH_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_SEARCH_LIMIT),
            timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            regions,
        })
    }
}
