//! Upstream geocoder client (Nominatim wire format).

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info_span, Instrument};
use url::Url;

use super::types::Place;

const SEARCH_RESULT_LIMIT: u8 = 5;

/// Raw place as the upstream returns it. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
}

impl NominatimPlace {
    /// Error payloads and partial rows simply yield `None`.
    fn into_place(self) -> Option<Place> {
        Some(Place {
            display_name: self.display_name?,
            latitude: self.lat?.parse().ok()?,
            longitude: self.lon?.parse().ok()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeocoderClient {
    base_url: Url,
    client: Client,
}

impl GeocoderClient {
    /// Build a client for the configured geocoder base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid geocoder URL")?;

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Failed to build geocoder HTTP client")?;

        Ok(Self { base_url, client })
    }

    fn endpoint_url(&self, segment: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("geocoder URL cannot be a base"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Forward search: free-text query to candidate places.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream is unreachable, answers with a
    /// non-success status, or sends a body that does not parse.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let mut url = self.endpoint_url("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &SEARCH_RESULT_LIMIT.to_string());

        let span = info_span!(
            "geocoder.search",
            http.method = "GET",
            url = %url
        );
        async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .context("geocoder request failed")?;
            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("geocoder search failed: {status}"));
            }

            let places: Vec<NominatimPlace> =
                response.json().await.context("invalid geocoder response")?;
            Ok(places
                .into_iter()
                .filter_map(NominatimPlace::into_place)
                .collect())
        }
        .instrument(span)
        .await
    }

    /// Reverse lookup: coordinates to the nearest place, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream is unreachable, answers with a
    /// non-success status, or sends a body that does not parse.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Place>> {
        let mut url = self.endpoint_url("reverse")?;
        url.query_pairs_mut()
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string())
            .append_pair("format", "json");

        let span = info_span!(
            "geocoder.reverse",
            http.method = "GET",
            url = %url
        );
        async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .context("geocoder request failed")?;
            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("geocoder reverse failed: {status}"));
            }

            let place: NominatimPlace =
                response.json().await.context("invalid geocoder response")?;
            Ok(place.into_place())
        }
        .instrument(span)
        .await
    }
}
