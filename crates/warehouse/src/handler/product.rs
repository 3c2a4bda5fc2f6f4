use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::{CreateProductRequest, QuantityRequest},
        response::{CreateResult, OperationResult, ProductResponse},
    },
    middleware::json::JsonBody,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found", body = String, example = json!("No product found for id 42")),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i64>,
) -> Result<Response, HttpError> {
    let response = match service.find_by_id(id).await? {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(format!("No product found for id {id}")),
        )
            .into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Product",
    responses(
        (status = 200, description = "Products with stock left to reserve", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_in_stock_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_in_stock().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/order",
    tag = "Inventory",
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Reservation outcome", body = OperationResult),
        (status = 409, description = "Product changed while the request was processed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn reserve(
    Extension(service): Extension<DynProductCommandService>,
    JsonBody(body): JsonBody<QuantityRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reserve(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/ship",
    tag = "Inventory",
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Shipment outcome", body = OperationResult),
        (status = 409, description = "Product changed while the request was processed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn ship(
    Extension(service): Extension<DynProductCommandService>,
    JsonBody(body): JsonBody<QuantityRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.ship(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/restock",
    tag = "Inventory",
    request_body = QuantityRequest,
    responses(
        (status = 200, description = "Restock outcome", body = OperationResult),
        (status = 409, description = "Product changed while the request was processed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn restock(
    Extension(service): Extension<DynProductCommandService>,
    JsonBody(body): JsonBody<QuantityRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.restock(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/add",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Creation outcome with the stored product", body = CreateResult<ProductResponse>),
        (status = 409, description = "Name taken concurrently", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    JsonBody(body): JsonBody<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/product/{id}", get(get_product))
        .route("/products", get(get_in_stock_products))
        .route("/order", post(reserve))
        .route("/ship", post(ship))
        .route("/restock", post(restock))
        .route("/add", post(create_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
