// src/bin/insight_server.rs
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;

use snm_insight_ticker::server::{configure, cors_handler, AppState};
use snm_insight_ticker::{InsightClient, InsightConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = InsightConfig::from_env()?;
    let client = InsightClient::from_config(&config)?;
    let state = web::Data::new(AppState::new(client));
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("🚀 Insight ticker server running on http://{}", bind_address);
    log::info!("  • POST /api/insight    - Resolve ticker symbols from free text");
    log::info!("  • GET  /api/regions    - Regions and their exchange allow-sets");
    log::info!("  • GET  /api/languages  - Supported insight languages");
    log::info!("  • GET  /health         - Health check");
    log::info!("Model: {} | search limit: {}", config.model, config.search_limit);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .default_service(web::to(cors_handler))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
