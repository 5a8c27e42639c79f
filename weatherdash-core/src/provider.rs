use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{CityQuery, CurrentConditions, ForecastSample},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of current conditions and raw forecast samples for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentConditions, WeatherError>;

    /// Raw 3-hourly samples in provider order; see [`crate::forecast::aggregate`].
    async fn fetch_forecast(&self, city: &CityQuery) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;
    provider_with_key(config, api_key)
}

fn provider_with_key(config: &Config, api_key: String) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::builder(api_key)
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(provider))
}
