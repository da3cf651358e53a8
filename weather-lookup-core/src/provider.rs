use crate::{
    config::{Config, Credential},
    error::LookupError,
    model::{WeatherQuery, WeatherReading},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issues exactly one request for `query` and maps the response.
    async fn current_weather(
        &self,
        query: &WeatherQuery,
        credential: &Credential,
    ) -> Result<WeatherReading, LookupError>;
}

/// Construct the provider described by config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let provider = match config.base_url.as_deref() {
        Some(url) => OpenWeatherProvider::with_base_url(url),
        None => OpenWeatherProvider::new(),
    };
    Box::new(provider)
}
