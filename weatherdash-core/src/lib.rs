//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - Daily forecast aggregation
//! - Recent searches and theme preference, persisted in a local store
//! - The [`Dashboard`] state machine tying them together
//!
//! It is used by `weatherdash-cli`, but can also be reused by other frontends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod history;
pub mod model;
pub mod provider;
pub mod storage;
pub mod theme;

pub use config::Config;
pub use dashboard::{Dashboard, ForecastView, SearchStatus};
pub use error::{CityQueryError, WeatherError};
pub use history::RecentSearches;
pub use model::{CityQuery, CurrentConditions, DailyForecast, ForecastSample};
pub use provider::{WeatherProvider, provider_from_config};
pub use storage::LocalStore;
pub use theme::{Palette, Rgb, Swatch, ThemePreference};
