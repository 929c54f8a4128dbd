//! Request principal extraction for protected endpoints.

use axum::http::{HeaderMap, StatusCode};

use super::claims::Role;
use super::session::verified_claims;
use super::state::AuthState;

/// Authenticated caller, as carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub role: Option<Role>,
}

/// Require a verified session token on the request.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the request carries no token or the token
/// fails verification.
pub fn require_auth(headers: &HeaderMap, state: &AuthState) -> Result<Principal, StatusCode> {
    let claims = verified_claims(headers, state).ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Principal {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role.as_deref().and_then(Role::parse),
    })
}
