// src/bin/api_server.rs

use product_catalog::infra::config::{self, StoreBackend};
use product_catalog::infra::telemetry::setup_tracing;
use product_catalog::transport;
use product_catalog::{InMemoryProductStore, PgProductStore, ProductService, ProductStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    // --- Store Initialization ---
    let store: Arc<dyn ProductStore> = match config::store_backend()? {
        StoreBackend::Postgres => {
            let database_url = config::database_url()?;
            let max_connections = config::db_max_connections()?;
            info!(max_connections, "connecting to Postgres product store");
            Arc::new(PgProductStore::connect(&database_url, max_connections).await?)
        }
        StoreBackend::Memory => {
            warn!("using the in-memory product store; data is lost on shutdown");
            Arc::new(InMemoryProductStore::new())
        }
    };

    let app_state = transport::http::AppState {
        service: Arc::new(ProductService::new(store)),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = format!("{}:{}", config::bind_addr(), config::port()?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
