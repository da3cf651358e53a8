//! Core library for the `weather-lookup` client.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap provider and the geolocation sources
//! - Display state, icon lookup and the pure renderer
//! - The controller that ties user actions to requests
//!
//! It is used by `weather-lookup-cli`, but can also be reused by other frontends.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::{Config, Credential};
pub use controller::WeatherController;
pub use display::{ReadingView, UiState, render};
pub use error::{GeolocationError, LookupError};
pub use geolocation::Geolocator;
pub use icon::Icon;
pub use model::{Coordinates, WeatherQuery, WeatherReading};
pub use provider::WeatherProvider;
