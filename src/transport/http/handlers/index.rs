#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Plain-text index", body = String, content_type = "text/plain")
    )
)]
pub async fn index_handler() -> &'static str {
    "index"
}
