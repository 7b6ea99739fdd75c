use crate::domain::model::Product;
use crate::domain::pagination::ProductPage;
use crate::domain::schema::{ProductCreateRequest, ProductResponse, ValidationErrors};
use crate::storage::Repository;
use crate::transport::http::error::handle_panic;
use crate::transport::http::handlers::{health, index, products};
use crate::transport::http::types::{AppState, HealthResponse, InternalErrorBody};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        index::index_handler,
        health::healthcheck_handler,
        products::list_products_handler,
        products::create_product_handler
    ),
    components(schemas(
        ProductResponse,
        ProductCreateRequest,
        ProductPage,
        ValidationErrors,
        InternalErrorBody,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Builds the application router over any product repository.
///
/// `CatchPanicLayer` sits outside the routes so a panic in any handler or
/// repository is translated like every other unhandled failure.
pub fn create_router<R>(app_state: AppState<R>) -> Router
where
    R: Repository<Product>,
{
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::healthcheck_handler::<R>))
        .route(
            "/product",
            get(products::list_products_handler::<R>).post(products::create_product_handler::<R>),
        )
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
