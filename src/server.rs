// src/server.rs
use crate::client::InsightClient;
use crate::types::{Language, Region, RequestContext};
use actix_web::http::Method;
use actix_web::{middleware::DefaultHeaders, web, HttpResponse, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

pub struct AppState {
    pub client: InsightClient,
    pub session_id: Uuid,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(client: InsightClient) -> Self {
        Self {
            client,
            session_id: Uuid::new_v4(),
            start_time: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .route("/insight", web::post().to(submit_insight))
            .route("/insight", web::method(Method::OPTIONS).to(cors_handler))
            .route("/regions", web::get().to(list_regions))
            .route("/languages", web::get().to(list_languages)),
    )
    .route("/health", web::get().to(health_check));
}

pub async fn submit_insight(
    payload: web::Json<InsightRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let req = payload.into_inner();

    if req.text.trim().is_empty() {
        return Ok(bad_request("Insight text must not be empty"));
    }

    let region = match req.region.as_deref() {
        Some(raw) => match raw.parse::<Region>() {
            Ok(region) => region,
            Err(e) => return Ok(bad_request(&e)),
        },
        None => Region::default(),
    };

    let language_hint = req
        .language
        .as_deref()
        .map(Language::hint_for)
        .unwrap_or_else(|| Language::default().label().to_string());

    let ctx = RequestContext::new();
    log::info!("[{}] new insight request (session {})", ctx, state.session_id);

    let outcome = state
        .client
        .submit_insight_with_context(&ctx, &req.text, &language_hint, region)
        .await;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Request-Id", ctx.to_string()))
        .json(outcome))
}

pub async fn list_regions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let regions: Vec<_> = Region::ALL
        .iter()
        .map(|region| {
            serde_json::json!({
                "key": region.key(),
                "label": region.label(),
                "exchanges": state.client.regions().allowed(*region),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "default": Region::default().key(),
        "regions": regions,
    })))
}

pub async fn list_languages() -> Result<HttpResponse> {
    let languages: Vec<_> = Language::ALL
        .iter()
        .map(|lang| serde_json::json!({ "key": lang.key(), "label": lang.label() }))
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "default": Language::default().key(),
        "languages": languages,
    })))
}

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "snm-insight-ticker",
        "session_id": state.session_id,
        "model": state.client.model(),
        "uptime_seconds": (Utc::now() - state.start_time).num_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

pub async fn cors_handler() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, GET, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
        .finish()
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}
