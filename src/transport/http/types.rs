use crate::app::database::Database;
use serde::Serialize;
use utoipa::ToSchema;

/// Shared handler state. `R` is the product repository.
#[derive(Clone)]
pub struct AppState<R> {
    pub products: R,
    pub database: Database,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of every 500 response. Never carries failure detail.
#[derive(Serialize, Debug, ToSchema)]
pub struct InternalErrorBody {
    pub message: String,
    /// Coarse failure category, e.g. `persistence failure`.
    pub error: String,
}
