use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod handlers;

/// Largest accepted upload, all files together.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let addr = std::env::var("SNAPIMG_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    log::info!("snapimg server running on http://{}", addr);
    log::info!("API endpoints:");
    log::info!("   POST /convert - Convert uploaded images (single file or ZIP)");
    log::info!("   GET  /tools   - List conversion tools");
    log::info!("   GET  /health  - Health check");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/tools", get(handlers::tools))
        .route("/convert", post(handlers::convert))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    concat!(
        "snapimg server v",
        env!("CARGO_PKG_VERSION"),
        "\n\nAPI Endpoints:\n  POST /convert\n  GET  /tools\n  GET  /health\n"
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
