mod config;
mod db;
mod errors;
mod models;
mod pdf_client;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use resume_merge::{Merger, ShellOptions};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::pdf_client::HttpPdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "resume_api={level},resume_merge={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize PDF renderer client
    let pdf = HttpPdfRenderer::new(config.pdf_renderer_url.clone())?;
    info!("PDF renderer client initialized ({})", config.pdf_renderer_url);

    // Merge engine: limits and page geometry from config
    let merger = Merger::new(config.merge_limits).with_shell(ShellOptions {
        page_size: config.page_size,
        ..Default::default()
    });
    info!(
        "Merge limits: {} template bytes, {} items per region, page {:?}",
        config.merge_limits.max_template_bytes,
        config.merge_limits.max_items_per_region,
        config.page_size
    );

    // Build app state
    let state = AppState {
        templates: store.clone(),
        resumes: store,
        pdf: Arc::new(pdf),
        merger,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the editor host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
