use crate::domain::product::{Product, ProductFields};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::types::{ErrorBody, HealthResponse};
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler
    ),
    components(schemas(Product, ProductFields, ErrorBody, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/products/:id",
            put(products::update_product_handler).delete(products::delete_product_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
