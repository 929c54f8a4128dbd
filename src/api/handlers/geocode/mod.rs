//! Location autocomplete backed by an upstream geocoder.
//!
//! The browser never talks to the geocoder directly. Both lookups proxy
//! through the service, which keeps the upstream URL and its rate limits a
//! server-side concern.

pub mod client;
pub mod types;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use self::client::GeocoderClient;
use self::types::{Place, ReverseParams, SearchParams};
use super::auth::{require_auth, AuthState};

#[utoipa::path(
    get,
    path = "/v1/geocode/search",
    tag = "geocode",
    params(SearchParams),
    responses(
        (status = 200, description = "Candidate places", body = [Place]),
        (status = 400, description = "Missing query"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Geocoding service unavailable")
    )
)]
pub async fn search(
    headers: HeaderMap,
    state: Extension<Arc<AuthState>>,
    geocoder: Extension<Arc<GeocoderClient>>,
    params: Option<Query<SearchParams>>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &state) {
        return status.into_response();
    }

    let Some(Query(params)) = params else {
        return (StatusCode::BAD_REQUEST, "Missing query".to_string()).into_response();
    };

    if params.q.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing query".to_string()).into_response();
    }

    match geocoder.search(&params.q).await {
        Ok(places) => Json(places).into_response(),
        Err(err) => {
            error!("Geocoder search failed: {err:?}");
            (
                StatusCode::BAD_GATEWAY,
                "Geocoding service unavailable".to_string(),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/geocode/reverse",
    tag = "geocode",
    params(ReverseParams),
    responses(
        (status = 200, description = "Nearest place, or null when nothing matches", body = Option<Place>),
        (status = 400, description = "Missing coordinates"),
        (status = 401, description = "Authentication required"),
        (status = 502, description = "Geocoding service unavailable")
    )
)]
pub async fn reverse(
    headers: HeaderMap,
    state: Extension<Arc<AuthState>>,
    geocoder: Extension<Arc<GeocoderClient>>,
    params: Option<Query<ReverseParams>>,
) -> impl IntoResponse {
    if let Err(status) = require_auth(&headers, &state) {
        return status.into_response();
    }

    let Some(Query(params)) = params else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing coordinates".to_string(),
        )
            .into_response();
    };

    match geocoder.reverse(params.lat, params.lon).await {
        Ok(place) => Json(place).into_response(),
        Err(err) => {
            error!("Geocoder reverse lookup failed: {err:?}");
            (
                StatusCode::BAD_GATEWAY,
                "Geocoding service unavailable".to_string(),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::{AuthConfig, SESSION_AUDIENCE};
    use crate::api::handlers::auth::store::UserStore;
    use crate::api::handlers::auth::AuthState;
    use crate::api::handlers::now_unix_seconds;
    use crate::token::{self, SessionTokenClaims};
    use anyhow::Result;
    use axum::http::header;
    use secrecy::SecretString;

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_state() -> Extension<Arc<AuthState>> {
        let config = AuthConfig::new(
            "http://localhost:3000".to_string(),
            SecretString::from(TEST_SECRET),
        );
        Extension(Arc::new(AuthState::new(
            config,
            UserStore::Memory(Vec::new()),
        )))
    }

    fn unreachable_geocoder() -> Result<Extension<Arc<GeocoderClient>>> {
        // Nothing listens on port 1, every lookup fails upstream.
        Ok(Extension(Arc::new(GeocoderClient::new(
            "http://127.0.0.1:1",
        )?)))
    }

    fn auth_headers() -> Result<HeaderMap> {
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
            role: Some("USER".to_string()),
        };
        let token = token::sign_hs256(TEST_SECRET.as_bytes(), &claims)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, format!("Bearer {token}").parse()?);
        Ok(headers)
    }

    #[tokio::test]
    async fn test_search_requires_auth() -> Result<()> {
        let params = Some(Query(SearchParams {
            q: "Berlin".to_string(),
        }));
        let response = search(HeaderMap::new(), test_state(), unreachable_geocoder()?, params)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_rejects_missing_or_empty_query() -> Result<()> {
        let response = search(auth_headers()?, test_state(), unreachable_geocoder()?, None)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let params = Some(Query(SearchParams {
            q: "   ".to_string(),
        }));
        let response = search(auth_headers()?, test_state(), unreachable_geocoder()?, params)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_bad_gateway() -> Result<()> {
        let params = Some(Query(SearchParams {
            q: "Berlin".to_string(),
        }));
        let response = search(auth_headers()?, test_state(), unreachable_geocoder()?, params)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_requires_auth() -> Result<()> {
        let params = Some(Query(ReverseParams {
            lat: 52.51,
            lon: 13.39,
        }));
        let response = reverse(HeaderMap::new(), test_state(), unreachable_geocoder()?, params)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_rejects_missing_coordinates() -> Result<()> {
        let response = reverse(auth_headers()?, test_state(), unreachable_geocoder()?, None)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_upstream_failure_is_bad_gateway() -> Result<()> {
        let params = Some(Query(ReverseParams {
            lat: 52.51,
            lon: 13.39,
        }));
        let response = reverse(auth_headers()?, test_state(), unreachable_geocoder()?, params)
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        Ok(())
    }
}
