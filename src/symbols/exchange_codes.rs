// src/symbols/exchange_codes.rs

use crate::error::InsightError;
use crate::types::Region;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::path::Path;

pub const REGION_EXCHANGES_PATH_ENV: &str = "REGION_EXCHANGES_PATH";

const US_EXCHANGES: &[&str] = &["NASDAQ", "NYSE"];
const HK_EXCHANGES: &[&str] = &["HKEX", "HKSE"];
// FMP reports Shanghai/Shenzhen as SHH/SHZ, older payloads used SSE/SZSE.
const CHINA_EXCHANGES: &[&str] = &["SSE", "SZSE", "SHH", "SHZ"];

static DEFAULT_REGION_EXCHANGES: Lazy<RegionExchanges> = Lazy::new(|| {
    RegionExchanges::new(
        to_set(US_EXCHANGES),
        to_set(HK_EXCHANGES),
        to_set(CHINA_EXCHANGES),
    )
});

fn to_set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

/// Allow-set of exchange short codes per region. `global` is always the union
/// of the other three and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionExchanges {
    us: BTreeSet<String>,
    hk: BTreeSet<String>,
    china: BTreeSet<String>,
    global: BTreeSet<String>,
}

/// On-disk shape of the region table. Missing regions keep their defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionExchangeFile {
    us: Option<Vec<String>>,
    hk: Option<Vec<String>>,
    china: Option<Vec<String>>,
}

impl RegionExchanges {
    pub fn new(us: BTreeSet<String>, hk: BTreeSet<String>, china: BTreeSet<String>) -> Self {
        let global = us.iter().chain(hk.iter()).chain(china.iter()).cloned().collect();
        Self { us, hk, china, global }
    }

    pub fn allowed(&self, region: Region) -> &BTreeSet<String> {
        match region {
            Region::Us => &self.us,
            Region::Hk => &self.hk,
            Region::China => &self.china,
            Region::Global => &self.global,
        }
    }

    pub fn contains(&self, region: Region, exchange_short_name: &str) -> bool {
        self.allowed(region).contains(exchange_short_name)
    }

    pub fn from_json(raw: &str) -> Result<Self, InsightError> {
        let file: RegionExchangeFile = serde_json::from_str(raw)
            .map_err(|e| InsightError::Config(format!("Invalid region exchange table: {}", e)))?;

        let defaults = Self::default();
        let pick = |codes: Option<Vec<String>>, fallback: &BTreeSet<String>| -> BTreeSet<String> {
            match codes {
                Some(codes) => codes.into_iter().map(|c| c.trim().to_string()).collect(),
                None => fallback.clone(),
            }
        };

        Ok(Self::new(
            pick(file.us, &defaults.us),
            pick(file.hk, &defaults.hk),
            pick(file.china, &defaults.china),
        ))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InsightError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Loads the table named by `REGION_EXCHANGES_PATH`, or the built-in
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self, InsightError> {
        match env::var(REGION_EXCHANGES_PATH_ENV) {
            Ok(path) => Self::from_file(&path).map_err(|e| {
                InsightError::Config(format!("Failed to load region exchanges from {}: {}", path, e))
            }),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for RegionExchanges {
    fn default() -> Self {
        DEFAULT_REGION_EXCHANGES.clone()
    }
}
