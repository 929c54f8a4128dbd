//! Wire types for the geocoding endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A resolved place with display name and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Place {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text location query.
    pub q: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReverseParams {
    pub lat: f64,
    pub lon: f64,
}
