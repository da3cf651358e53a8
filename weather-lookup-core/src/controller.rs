use parking_lot::Mutex;

use crate::{
    config::Credential,
    display::UiState,
    error::LookupError,
    geolocation::Geolocator,
    model::{WeatherQuery, WeatherReading},
    provider::WeatherProvider,
};

/// Turns user actions into at most one provider request each and keeps the display state.
///
/// Overlapping lookups are not coordinated: each one writes the state when it
/// finishes, so the last to complete is what stays on screen.
#[derive(Debug)]
pub struct WeatherController {
    provider: Box<dyn WeatherProvider>,
    geolocator: Box<dyn Geolocator>,
    api_key: Option<String>,
    state: Mutex<UiState>,
}

impl WeatherController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        geolocator: Box<dyn Geolocator>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            provider,
            geolocator,
            api_key,
            state: Mutex::new(UiState::Idle),
        }
    }

    pub fn state(&self) -> UiState {
        self.state.lock().clone()
    }

    pub async fn submit_city_query(&self, text: &str) -> Result<WeatherReading, LookupError> {
        let city = text.trim();
        if city.is_empty() {
            return Err(self.show_error(LookupError::EmptyCity));
        }
        self.resolve_query(WeatherQuery::City(city.to_string())).await
    }

    pub async fn submit_location_query(&self) -> Result<WeatherReading, LookupError> {
        let coords = match self.geolocator.current_position().await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!(error = %e, "Could not determine position");
                return Err(self.show_error(e.into()));
            }
        };
        self.resolve_query(WeatherQuery::Coordinates(coords)).await
    }

    pub async fn resolve_query(&self, query: WeatherQuery) -> Result<WeatherReading, LookupError> {
        let credential = match Credential::parse(self.api_key.as_deref()) {
            Ok(credential) => credential,
            Err(e) => return Err(self.show_error(e)),
        };

        self.clear_error();

        match self.provider.current_weather(&query, &credential).await {
            Ok(reading) => {
                *self.state.lock() = UiState::Reading(reading.clone());
                Ok(reading)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching weather data");
                Err(self.show_error(e))
            }
        }
    }

    fn clear_error(&self) {
        let mut state = self.state.lock();
        if matches!(*state, UiState::Error(_)) {
            *state = UiState::Idle;
        }
    }

    fn show_error(&self, e: LookupError) -> LookupError {
        if e.is_local() {
            tracing::debug!(error = %e, "Rejected lookup before sending a request");
        }
        *self.state.lock() = UiState::Error(e.to_string());
        e
    }
}
