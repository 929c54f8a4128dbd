//! Session presentation and the cookie that carries the token.
//!
//! There is no session table. The signed token is the whole session, so
//! `GET /v1/auth/session` only decodes what the client presents and logout
//! amounts to clearing the cookie.

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use super::claims::{project_session, Claims, Role, Session, SessionUser};
use super::state::{AuthState, SESSION_AUDIENCE};
use crate::api::handlers::now_unix_seconds;
use crate::token::{self, SessionTokenClaims};

pub const SESSION_COOKIE_NAME: &str = "raporto_session";

/// Build the `Set-Cookie` value that carries a freshly minted session token.
///
/// # Errors
///
/// Returns an error if the token contains bytes that cannot appear in a
/// header value.
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> Result<HeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).context("Failed to build session cookie header")
}

#[must_use]
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(
            "raporto_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure",
        )
    } else {
        HeaderValue::from_static("raporto_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Extract the session token from the request, `Authorization: Bearer` first,
/// then the session cookie.
#[must_use]
pub fn bearer_or_cookie_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
    })
}

/// Decode and verify the session token a request presents, if any.
///
/// Invalid tokens are treated as absent. The rejection reason only shows up
/// at debug level since expired tokens are routine.
#[must_use]
pub fn verified_claims(headers: &HeaderMap, state: &AuthState) -> Option<SessionTokenClaims> {
    let token = bearer_or_cookie_token(headers)?;

    match token::verify_hs256(
        &token,
        state.config.token_secret_bytes(),
        &state.config.token_issuer,
        SESSION_AUDIENCE,
        now_unix_seconds(),
    ) {
        Ok(claims) => Some(claims),
        Err(err) => {
            debug!("Rejected session token: {err}");
            None
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Active session", body = Session),
        (status = 204, description = "No active session")
    )
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    let Some(claims) = verified_claims(&headers, &state) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let session = Session {
        user: Some(SessionUser {
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: None,
        }),
    };

    // A token with an unknown or absent role still yields a session, just
    // without one.
    let session = match claims.role.as_deref().and_then(Role::parse) {
        Some(role) => project_session(
            session,
            &Claims {
                id: claims.sub,
                email: claims.email,
                name: claims.name,
                role,
            },
        ),
        None => session,
    };

    (StatusCode::OK, Json(session)).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session cookie cleared")
    )
)]
pub async fn logout(state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        clear_session_cookie(state.config.session_cookie_secure()),
    );
    (StatusCode::NO_CONTENT, headers).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::AuthConfig;
    use crate::api::handlers::auth::store::UserStore;
    use secrecy::SecretString;

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_state() -> Arc<AuthState> {
        let config = AuthConfig::new(
            "http://localhost:3000".to_string(),
            SecretString::from(TEST_SECRET),
        );
        Arc::new(AuthState::new(config, UserStore::Memory(Vec::new())))
    }

    fn signed_token(role: Option<&str>) -> Result<String> {
        let now = now_unix_seconds();
        let claims = SessionTokenClaims {
            v: token::TOKEN_VERSION,
            iss: "raporto".to_string(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: now + 600,
            iat: now,
            jti: "jti-test".to_string(),
            sub: "user-1".to_string(),
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            role: role.map(ToString::to_string),
        };
        token::sign_hs256(TEST_SECRET.as_bytes(), &claims)
            .map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    #[test]
    fn test_session_cookie_format() -> Result<()> {
        let cookie = session_cookie("abc", 60, false)?;
        assert_eq!(
            cookie.to_str()?,
            "raporto_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );

        let cookie = session_cookie("abc", 60, true)?;
        assert!(cookie.to_str()?.ends_with("; Secure"));
        Ok(())
    }

    #[test]
    fn test_session_cookie_rejects_non_header_bytes() {
        // Tokens we mint are base64url and never hit this, but the login
        // handler answers 500 instead of a cookieless 200 if it ever does.
        assert!(session_cookie("tok\nen", 60, false).is_err());
        assert!(session_cookie("tok\ren", 60, false).is_err());
    }

    #[test]
    fn test_clear_cookie_expires_immediately() -> Result<()> {
        for secure in [false, true] {
            let cookie = clear_session_cookie(secure);
            let value = cookie.to_str()?;
            assert!(value.starts_with(&format!("{SESSION_COOKIE_NAME}=;")));
            assert!(value.contains("Max-Age=0"));
        }
        Ok(())
    }

    #[test]
    fn test_bearer_takes_precedence_over_cookie() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse()?);
        headers.insert(
            header::COOKIE,
            "other=1; raporto_session=from-cookie".parse()?,
        );

        assert_eq!(
            bearer_or_cookie_token(&headers),
            Some("from-header".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_cookie_fallback_and_empty_values() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ".parse()?);
        headers.insert(
            header::COOKIE,
            "a=1; raporto_session=tok; b=2".parse()?,
        );
        assert_eq!(bearer_or_cookie_token(&headers), Some("tok".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "raporto_session=".parse()?);
        assert_eq!(bearer_or_cookie_token(&headers), None);

        assert_eq!(bearer_or_cookie_token(&HeaderMap::new()), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_session_without_token_is_no_content() {
        let response = session(HeaderMap::new(), Extension(test_state()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_session_with_valid_token_carries_role() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", signed_token(Some("MODERATOR"))?).parse()?,
        );

        let response = session(headers, Extension(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let session: Session = serde_json::from_slice(&body)?;
        let user = session.user.context("expected a signed-in user")?;
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, Some(Role::Moderator));
        Ok(())
    }

    #[tokio::test]
    async fn test_session_with_unknown_role_omits_it() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", signed_token(Some("SUPERUSER"))?).parse()?,
        );

        let response = session(headers, Extension(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        assert!(!String::from_utf8_lossy(&body).contains("role"));
        Ok(())
    }

    #[tokio::test]
    async fn test_session_with_garbage_token_is_no_content() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer not-a-token".parse()?);

        let response = session(headers, Extension(test_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() -> Result<()> {
        let response = logout(Extension(test_state())).await.into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .context("expected a Set-Cookie header")?;
        assert!(cookie.to_str()?.contains("Max-Age=0"));
        Ok(())
    }
}
