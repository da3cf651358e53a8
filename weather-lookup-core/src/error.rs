use thiserror::Error;

/// Every way a single lookup can end without a reading.
///
/// The `Display` text is what the user sees in the error panel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Unable to retrieve your location. Please allow location access or search for a city.")]
    LocationUnavailable,

    #[error("Geolocation is not supported on this system.")]
    GeolocationUnsupported,

    #[error("Please configure the OpenWeatherMap API key.")]
    MissingCredential,

    #[error("Could not fetch weather data. Invalid API key. Please check the configured key.")]
    InvalidCredential,

    /// Non-success status other than 401.
    #[error("Could not fetch weather data. {message}")]
    Provider { status: u16, message: String },

    /// No response at all.
    #[error("Could not fetch weather data. Network request failed: {0}")]
    Transport(String),

    #[error("Could not fetch weather data. Malformed response: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    /// True for the kinds decided locally, before any request goes out.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LookupError::EmptyCity
                | LookupError::LocationUnavailable
                | LookupError::GeolocationUnsupported
                | LookupError::MissingCredential
        )
    }
}

/// Failure reported by a [`crate::geolocation::Geolocator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("geolocation is not supported")]
    Unsupported,
}

impl From<GeolocationError> for LookupError {
    fn from(e: GeolocationError) -> Self {
        match e {
            GeolocationError::PermissionDenied | GeolocationError::Unavailable(_) => {
                LookupError::LocationUnavailable
            }
            GeolocationError::Unsupported => LookupError::GeolocationUnsupported,
        }
    }
}
