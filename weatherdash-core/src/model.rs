use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CityQueryError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// A trimmed, non-empty city name as typed by the user.
///
/// The original casing is kept; only deduplication in the recent-search list
/// compares case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(raw: &str) -> Result<Self, CityQueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CityQueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Case-insensitive comparison used for recent-search deduplication.
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = CityQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for a city, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city_name: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon_id: String,
    pub humidity_pct: u8,
    pub wind_speed: f64,
}

impl CurrentConditions {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon_id)
    }
}

/// One 3-hourly entry of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp_unix: i64,
    pub temperature_c: f64,
    pub description: String,
    pub icon_id: String,
}

impl ForecastSample {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon_id)
    }
}

/// The sample chosen to represent one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub sample: ForecastSample,
}
