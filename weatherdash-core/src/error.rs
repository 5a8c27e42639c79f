pub use reqwest::StatusCode;

/// Rejected user input for a city search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CityQueryError {
    #[error("City name must not be empty")]
    Empty,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status. Unknown city, bad API
    /// key and provider outage all land here.
    #[error("City not found or API error.")]
    NotFoundOrProvider {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    InvalidCity(#[from] CityQueryError),
}

impl WeatherError {
    pub fn is_not_found_or_provider(&self) -> bool {
        matches!(self, Self::NotFoundOrProvider { .. })
    }
}
