use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Service {
    name: String,
    version: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses (
        (status = 200, description = "Service name and version", body = [Service])
    ),
    tag = "raporto"
)]
// axum handler for the root path
pub async fn root() -> impl IntoResponse {
    Json(Service {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
