// src/lib.rs
pub mod config;
pub mod error;
pub mod types;
pub mod symbols;
pub mod services;
pub mod tools;
pub mod client;
pub mod server;

pub use client::InsightClient;
pub use config::InsightConfig;
pub use error::InsightError;
pub use server::{AppState, configure, cors_handler, health_check, submit_insight};
pub use types::{Candidate, InsightOutcome, Language, Region, RequestContext, ResolvedTicker};
