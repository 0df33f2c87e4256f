use crate::domain::product::{Product, ProductFields, ProductId};
use crate::transport::http::types::{json_400, AppState, ErrorBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Every stored product", body = [Product]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductFields,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, description = "Validation failure or malformed JSON", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return json_400(e).into_response(),
    };

    match state.service.create(&body).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    request_body = ProductFields,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation failure or malformed JSON", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return json_400(e).into_response(),
    };

    match state.service.update(&ProductId::from(id), &body).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No product with this id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.delete(&ProductId::from(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
