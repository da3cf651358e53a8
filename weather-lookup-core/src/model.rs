use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// What the user asked for: a typed city or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinates),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub location_name: String,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    /// Primary condition category, e.g. "Rain".
    pub condition: String,
    pub description: String,
    pub observation_time: DateTime<Utc>,
    /// Seconds east of UTC at the reported location.
    pub timezone_offset: FixedOffset,
}

impl WeatherReading {
    /// Observation instant as seen on a wall clock at the location.
    pub fn local_time(&self) -> DateTime<FixedOffset> {
        self.observation_time.with_timezone(&self.timezone_offset)
    }
}
