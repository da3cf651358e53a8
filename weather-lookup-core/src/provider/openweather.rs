use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::Credential,
    error::LookupError,
    model::{WeatherQuery, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl Default for OpenWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenWeatherProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Query string for one current-weather request.
    pub fn query_params(
        query: &WeatherQuery,
        credential: &Credential,
    ) -> Vec<(&'static str, String)> {
        let mut params = match query {
            WeatherQuery::City(city) => vec![("q", city.clone())],
            WeatherQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };
        params.push(("appid", credential.as_str().to_string()));
        params.push(("units", UNITS.to_string()));
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        query: &WeatherQuery,
        credential: &Credential,
    ) -> Result<WeatherReading, LookupError> {
        tracing::debug!(?query, url = %self.base_url, "Requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&Self::query_params(query, credential))
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

        let reading = WeatherReading::try_from(parsed)?;
        tracing::info!(
            location = %reading.location_name,
            condition = %reading.condition,
            "Received current weather"
        );
        Ok(reading)
    }
}

/// 401 always maps to the invalid-key error; anything else prefers the provider's message.
fn status_error(status: StatusCode, body: &str) -> LookupError {
    if status == StatusCode::UNAUTHORIZED {
        return LookupError::InvalidCredential;
    }

    let message = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

    LookupError::Provider {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: Option<OwSys>,
}

fn malformed(detail: String) -> LookupError {
    LookupError::MalformedResponse(detail)
}

impl TryFrom<OwCurrentResponse> for WeatherReading {
    type Error = LookupError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let observation_time = DateTime::from_timestamp(parsed.dt, 0)
            .ok_or_else(|| malformed(format!("observation time {} out of range", parsed.dt)))?;

        let timezone_offset = FixedOffset::east_opt(parsed.timezone)
            .ok_or_else(|| malformed(format!("timezone offset {} out of range", parsed.timezone)))?;

        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| malformed("no weather conditions".to_string()))?;

        Ok(WeatherReading {
            location_name: parsed.name,
            country: parsed.sys.and_then(|s| s.country).filter(|c| !c.is_empty()),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            condition: weather.main,
            description: weather.description,
            observation_time,
            timezone_offset,
        })
    }
}
