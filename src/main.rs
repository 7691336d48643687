mod adapters;
mod ai;
mod api;
mod config;
mod dispatch;
mod error;
mod report;
mod tools;
mod types;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::ai::OpenRouterClient;
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::report::ReportRenderer;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    if config.ai.api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set, AI review will report the missing key");
    }

    let model = Arc::new(OpenRouterClient::from_config(&config.ai));
    let dispatcher = web::Data::new(Dispatcher::new(&config.tools, model));
    let renderer = web::Data::new(ReportRenderer::from_config(&config.reports));

    info!(
        host = %config.server.host,
        port = config.server.port,
        reports = %renderer.dir().display(),
        "starting code review api server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(dispatcher.clone())
            .app_data(renderer.clone())
            .route("/", web::get().to(api::root))
            .configure(api::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| {
        format!(
            "could not bind {}:{}",
            config.server.host, config.server.port
        )
    })?
    .run()
    .await?;

    Ok(())
}
