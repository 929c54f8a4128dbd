//! Shared authentication state.

use secrecy::{ExposeSecret, SecretString};

use super::store::UserStore;

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;
pub const DEFAULT_TOKEN_ISSUER: &str = "raporto";

/// Audience stamped into and required from every session token.
pub const SESSION_AUDIENCE: &str = "raporto";

/// Token and cookie settings shared by all auth handlers.
#[derive(Clone)]
pub struct AuthConfig {
    pub frontend_base_url: String,
    token_secret: SecretString,
    pub token_issuer: String,
    pub session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String, token_secret: SecretString) -> Self {
        Self {
            frontend_base_url,
            token_secret,
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_token_issuer(mut self, token_issuer: String) -> Self {
        self.token_issuer = token_issuer;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, session_ttl_seconds: i64) -> Self {
        self.session_ttl_seconds = session_ttl_seconds;
        self
    }

    /// The cookie carries `Secure` only when the frontend is served over https.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }

    #[must_use]
    pub fn token_secret_bytes(&self) -> &[u8] {
        self.token_secret.expose_secret().as_bytes()
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub users: UserStore,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, users: UserStore) -> Self {
        Self { config, users }
    }
}
