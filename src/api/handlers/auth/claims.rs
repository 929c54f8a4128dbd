//! Session claims and their projection into the session payload.

use super::store::UserRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of roles a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
    Moderator,
}

impl Role {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Self::Admin),
            "USER" => Some(Self::User),
            "MODERATOR" => Some(Self::Moderator),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
            Self::Moderator => "MODERATOR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity claims derived from a verified user record.
///
/// A claims value only exists after credential verification succeeded, so the
/// role is always present and always a member of [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Project a verified user record into session claims.
#[must_use]
pub fn build_claims(record: &UserRecord) -> Claims {
    Claims {
        id: record.id.clone(),
        email: record.email.clone(),
        name: record.name.clone(),
        role: record.role,
    }
}

/// User half of a session payload as clients see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Session payload returned to clients.
///
/// `user` is `None` when nobody is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user: Option<SessionUser>,
}

impl Session {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }
}

/// Attach the role carried in `claims` to the session's user.
///
/// Sessions without a user pass through untouched, so callers never have to
/// guard the anonymous case. An existing role is overwritten, never merged.
#[must_use]
pub fn project_session(session: Session, claims: &Claims) -> Session {
    match session.user {
        Some(user) => Session {
            user: Some(SessionUser {
                role: Some(claims.role),
                ..user
            }),
        },
        None => session,
    }
}
