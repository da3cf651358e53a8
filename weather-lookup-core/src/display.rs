//! What is on screen, and how it is drawn.
//!
//! [`UiState`] is the whole display surface. [`render`] is a pure function of it,
//! so every frontend draws the same thing for the same state.

use crate::{icon::Icon, model::WeatherReading};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    /// Nothing shown yet.
    #[default]
    Idle,
    Reading(WeatherReading),
    Error(String),
}

impl UiState {
    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            UiState::Reading(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Display strings for one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingView {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub local_time: String,
    pub icon: Icon,
}

impl From<&WeatherReading> for ReadingView {
    fn from(r: &WeatherReading) -> Self {
        let location = match &r.country {
            Some(country) => format!("{}, {}", r.location_name, country),
            None => r.location_name.clone(),
        };

        Self {
            location,
            temperature: format!("{}°C", round_half_up(r.temperature_c)),
            description: r.description.clone(),
            feels_like: format!("{}°C", round_half_up(r.feels_like_c)),
            humidity: format!("{}%", r.humidity_pct),
            wind_speed: format!("{} m/s", one_decimal(r.wind_speed_mps)),
            pressure: format!("{} hPa", r.pressure_hpa),
            local_time: r.local_time().format("%A %I:%M %p").to_string(),
            icon: Icon::for_condition(&r.condition),
        }
    }
}

/// Halves round towards positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// One decimal place, exact ties away from zero: 1.25 -> "1.3", 0.35 -> "0.3".
///
/// `{:.1}` already rounds the exact binary value correctly except on exact ties,
/// where it picks the even digit. At one decimal the only exact ties are
/// values ending in .25 or .75.
fn one_decimal(value: f64) -> String {
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let rounded = (value.abs() * 10.0 + 0.5).floor() / 10.0;
        return format!("{:.1}", rounded.copysign(value));
    }
    format!("{value:.1}")
}

pub fn render(state: &UiState) -> String {
    match state {
        UiState::Idle => String::new(),
        UiState::Error(message) => format!("Error: {message}"),
        UiState::Reading(reading) => {
            let view = ReadingView::from(reading);
            format!(
                "{icon}  {location}\n   {temp}  {desc}\n   {time}\n\n   \
                 Feels like  {feels}\n   Humidity    {humidity}\n   \
                 Wind        {wind}\n   Pressure    {pressure}",
                icon = view.icon.glyph(),
                location = view.location,
                temp = view.temperature,
                desc = view.description,
                time = view.local_time,
                feels = view.feels_like,
                humidity = view.humidity,
                wind = view.wind_speed,
                pressure = view.pressure,
            )
        }
    }
}
