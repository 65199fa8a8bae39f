use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::GeocoderSettings;
use crate::models::Coordinates;
use crate::services::cache::LocationCache;

/// Errors that can occur when resolving a location
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Single result from a Nominatim `/search` call
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Free-text to coordinates lookup against a Nominatim-compatible endpoint
pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
    cache: LocationCache,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: String,
        user_agent: &str,
        timeout: Duration,
        cache: LocationCache,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            client,
            cache,
        })
    }

    pub fn from_settings(settings: &GeocoderSettings) -> Result<Self, GeocodeError> {
        Self::new(
            settings.endpoint.clone(),
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
            LocationCache::new(settings.cache_size, settings.cache_ttl_secs),
        )
    }

    /// Resolve location text to coordinates
    ///
    /// Returns `Ok(None)` for blank text or when the geocoder knows no such place.
    pub async fn geocode(&self, location_text: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let text = location_text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if let Some(hit) = self.cache.get(text).await {
            return Ok(Some(hit));
        }

        let url = format!(
            "{}/search?format=json&limit=1&addressdetails=1&q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(text)
        );

        tracing::debug!("Geocoding '{}' via {}", text, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Failed to geocode '{}': {}",
                text,
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse places: {}", e)))?;

        let Some(place) = places.first() else {
            tracing::info!("Geocoder found no place for '{}'", text);
            return Ok(None);
        };

        let coordinates = parse_coordinates(place)?;
        self.cache.insert(text, coordinates).await;

        Ok(Some(coordinates))
    }

    pub fn cache(&self) -> &LocationCache {
        &self.cache
    }
}

fn parse_coordinates(place: &NominatimPlace) -> Result<Coordinates, GeocodeError> {
    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("Bad latitude: {}", place.lat)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("Bad longitude: {}", place.lon)))?;

    Ok(Coordinates::new(latitude, longitude))
}
