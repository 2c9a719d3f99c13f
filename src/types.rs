// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Per-submission correlation id. Created once, passed by reference to every
/// stage so concurrent submissions never share log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestContext {
    pub id: Uuid,
}

impl RequestContext {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Unresolved ticker/company guess produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub ticker: String,
    pub company: String,
}

impl Candidate {
    pub fn new(ticker: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company: company.into(),
        }
    }
}

/// A search-service entry that passed the region filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTicker {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub stock_exchange: Option<String>,
    pub exchange_short_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Hk,
    China,
    #[default]
    Global,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Us, Region::Hk, Region::China, Region::Global];

    pub fn key(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Hk => "hk",
            Region::China => "china",
            Region::Global => "global",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Us => "The United States",
            Region::Hk => "Hong Kong",
            Region::China => "China",
            Region::Global => "Global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "hk" => Ok(Region::Hk),
            "china" => Ok(Region::China),
            "global" => Ok(Region::Global),
            other => Err(format!(
                "unknown region '{}', expected one of: us, hk, china, global",
                other
            )),
        }
    }
}

/// Language of the user's insight. Only its label reaches the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Sc,
    Tc,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Sc, Language::Tc];

    pub fn key(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sc => "sc",
            Language::Tc => "tc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Sc => "简体中文",
            Language::Tc => "繁體中文",
        }
    }

    /// Maps a language key to its label. Anything else is passed through
    /// untouched since the hint is advisory.
    pub fn hint_for(key: &str) -> String {
        key.parse::<Language>()
            .map(|lang| lang.label().to_string())
            .unwrap_or_else(|_| key.to_string())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "sc" => Ok(Language::Sc),
            "tc" => Ok(Language::Tc),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

/// Result of one submission as seen by the caller: either a populated list or
/// the explicit empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    Found(Vec<ResolvedTicker>),
    Empty,
}

impl InsightOutcome {
    pub fn from_tickers(tickers: Vec<ResolvedTicker>) -> Self {
        if tickers.is_empty() {
            InsightOutcome::Empty
        } else {
            InsightOutcome::Found(tickers)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InsightOutcome::Empty)
    }

    pub fn tickers(&self) -> &[ResolvedTicker] {
        match self {
            InsightOutcome::Found(tickers) => tickers,
            InsightOutcome::Empty => &[],
        }
    }

    pub fn into_tickers(self) -> Vec<ResolvedTicker> {
        match self {
            InsightOutcome::Found(tickers) => tickers,
            InsightOutcome::Empty => Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct OutcomeBody<'a> {
    status: &'static str,
    tickers: &'a [ResolvedTicker],
}

impl Serialize for InsightOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let status = match self {
            InsightOutcome::Found(_) => "found",
            InsightOutcome::Empty => "empty",
        };
        OutcomeBody {
            status,
            tickers: self.tickers(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_region_parsing_is_case_insensitive() {
        assert_eq!("US".parse::<Region>().unwrap(), Region::Us);
        assert_eq!(" china ".parse::<Region>().unwrap(), Region::China);
        assert!("europe".parse::<Region>().is_err());
    }

    #[test]
    fn test_language_hint_passthrough() {
        assert_eq!(Language::hint_for("tc"), "繁體中文");
        assert_eq!(Language::hint_for("Deutsch"), "Deutsch");
    }

    #[test]
    fn test_resolved_ticker_uses_camel_case() {
        let ticker: ResolvedTicker = serde_json::from_value(json!({
            "symbol": "0700.HK",
            "name": "Tencent Holdings Limited",
            "currency": "HKD",
            "stockExchange": "Hong Kong Stock Exchange",
            "exchangeShortName": "HKSE"
        }))
        .unwrap();
        assert_eq!(ticker.exchange_short_name, "HKSE");
        assert_eq!(ticker.stock_exchange.as_deref(), Some("Hong Kong Stock Exchange"));

        let value = serde_json::to_value(&ticker).unwrap();
        assert_eq!(value["exchangeShortName"], "HKSE");
    }

    #[test]
    fn test_resolved_ticker_tolerates_null_currency() {
        let ticker: ResolvedTicker = serde_json::from_value(json!({
            "symbol": "600519.SS",
            "name": "Kweichow Moutai",
            "currency": null,
            "exchangeShortName": "SHH"
        }))
        .unwrap();
        assert!(ticker.currency.is_none());
        assert!(ticker.stock_exchange.is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let empty = serde_json::to_value(InsightOutcome::from_tickers(vec![])).unwrap();
        assert_eq!(empty, json!({"status": "empty", "tickers": []}));

        let found = InsightOutcome::from_tickers(vec![ResolvedTicker {
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
            currency: Some("USD".into()),
            stock_exchange: Some("NASDAQ Global Select".into()),
            exchange_short_name: "NASDAQ".into(),
        }]);
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["tickers"][0]["symbol"], "AAPL");
    }
}
