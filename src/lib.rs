//! # Raporto (Report Collection Service)
//!
//! `raporto` is a small HTTP service for collecting field reports. It handles
//! credential-based login, stateless role-aware sessions, report submission,
//! and a server-side proxy for location autocomplete.
//!
//! ## Authentication & Sessions
//!
//! Users authenticate with email and password. Passwords are stored as
//! `Argon2id` digests; plaintext never touches the database. A successful
//! login mints an `HS256`-signed session token (JWT) carrying the user's
//! identity claims and role, delivered both in the response body and as an
//! `HttpOnly` cookie.
//!
//! Sessions are **stateless**: there is no server-side session table. Every
//! authenticated request re-derives the session view from the presented
//! token, so logout only clears the cookie and tokens simply age out.
//!
//! ## Roles
//!
//! Each user carries exactly one role: `ADMIN`, `USER`, or `MODERATOR`. The
//! role is embedded in the token claims at login and projected into the
//! session on every request. This service attaches the role; it does not
//! enforce per-role permissions.
//!
//! ## Reports & Geocoding
//!
//! Authenticated users submit reports (title, category, free text, optional
//! coordinates). Report identifiers use `UUIDv7` so primary keys stay
//! time-ordered. Location autocomplete is proxied through `/v1/geocode/*` to
//! keep the upstream geocoder URL and user-agent policy server-side.

pub mod api;
pub mod cli;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
