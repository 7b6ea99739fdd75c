use crate::domain::model::Product;
use crate::domain::pagination::{paginate, PageParams, PageRequest, PaginationError, ProductPage};
use crate::domain::schema::{
    DumpSchema, LoadSchema, ProductCreateSchema, ProductResponse, ProductSchema,
    ValidationErrors, SCHEMA_FIELD,
};
use crate::storage::Repository;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/product",
    params(PageParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, description = "Invalid pagination parameters", body = ValidationErrors),
        (status = 500, description = "Internal server error", body = InternalErrorBody)
    )
)]
pub async fn list_products_handler<R>(
    State(state): State<AppState<R>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ProductPage>, ApiError>
where
    R: Repository<Product>,
{
    let Query(pairs) = pairs.map_err(|e| PaginationError {
        fields: ValidationErrors::single(SCHEMA_FIELD, e.body_text()),
    })?;
    let request = PageRequest::try_from(PageParams::from_pairs(pairs)?)?;

    let query = state.products.get_all();
    let page = paginate(&query, request, &ProductSchema).await?;
    Ok(Json(page))
}

// Success is a plain 200, not 201.
#[utoipa::path(
    post,
    path = "/product",
    request_body = ProductCreateRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 500, description = "Internal server error", body = InternalErrorBody)
    )
)]
pub async fn create_product_handler<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError>
where
    R: Repository<Product>,
{
    let Json(body) =
        body.map_err(|e| ValidationErrors::single(SCHEMA_FIELD, e.body_text()))?;

    let product = ProductCreateSchema.load(&body)?;
    let product = state.products.save(product).await?;
    tracing::info!(id = ?product.id, name = %product.name, "product created");

    Ok(Json(ProductSchema.dump(&product)))
}
