//! Auth handlers and supporting modules.
//!
//! This module coordinates credential login, session tokens, and role
//! projection.
//!
//! ## Stateless Sessions
//!
//! There is no session table. Login verifies credentials against the user
//! store, projects the record into claims, and signs the claims into an
//! `HS256` token. Every later request rebuilds the session from that token
//! alone, so any instance sharing the secret can answer it.
//!
//! > **Warning:** Rotating the token secret signs everybody out.

pub mod claims;
pub mod login;
pub mod password;
pub mod principal;
pub mod session;
pub mod state;
pub mod store;
pub mod types;
pub mod verifier;

pub use claims::{build_claims, project_session, Claims, Role, Session, SessionUser};
pub use principal::{require_auth, Principal};
pub use state::{AuthConfig, AuthState};
pub use store::{UserRecord, UserStore};
pub use verifier::{authorize, AuthError, Credentials};
