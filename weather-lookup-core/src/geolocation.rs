//! Where "use my location" gets its coordinates from.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{config::Config, error::GeolocationError, model::Coordinates};

pub const DEFAULT_LOCATE_URL: &str = "http://ip-api.com/json";

/// One-shot position request.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always answers with the same position, e.g. coordinates given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// No location capability on this system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

#[async_trait]
impl Geolocator for DisabledGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::with_url(DEFAULT_LOCATE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeolocationError::Unavailable(format!("status {status}")));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        let IpApiResponse {
            status,
            message,
            lat,
            lon,
        } = body;

        match (status.as_str(), lat, lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => {
                let detail = message.unwrap_or_else(|| "no position in response".into());
                Err(GeolocationError::Unavailable(detail))
            }
        }
    }
}

/// Pick the geolocator for this run. Explicit coordinates win over config.
pub fn geolocator_from_config(
    config: &Config,
    fixed: Option<Coordinates>,
) -> Box<dyn Geolocator> {
    match (fixed, config.geolocation) {
        (Some(coords), _) => Box::new(FixedGeolocator(coords)),
        (None, false) => Box::new(DisabledGeolocator),
        (None, true) => match config.locate_url.as_deref() {
            Some(url) => Box::new(IpGeolocator::with_url(url)),
            None => Box::new(IpGeolocator::default()),
        },
    }
}
