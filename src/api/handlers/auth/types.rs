//! Wire types for the auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::claims::Session;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.test")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Session token, also set as a cookie, for clients that prefer a
    /// `Bearer` header.
    pub token: String,
    /// Unix timestamp after which the token is rejected.
    pub expires_at: i64,
    pub session: Session,
}
