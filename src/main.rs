// src/main.rs

use product_catalog::infra::config::AppConfig;
use product_catalog::infra::logging::init_tracing;
use product_catalog::transport;
use product_catalog::{seed_sample_products, Database, Product, SqliteRepository};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let config = AppConfig::from_env()?;

    // --- Database Initialization ---
    let database = Database::connect(&config.database).await?;
    database.create_schema::<Product>().await?;
    let products = SqliteRepository::<Product>::new(database.pool().clone());

    if config.seed_sample_data {
        let seeded = seed_sample_products(&products).await?;
        info!(seeded, "sample products ready");
    }

    let app_state = transport::http::AppState { products, database };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on http://{}", config.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Shutdown signal received (Ctrl+C)..."),
        _ = terminate => warn!("Shutdown signal received (SIGTERM)..."),
    }
}
