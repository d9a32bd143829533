use crate::{Config, WeatherRecord, error::LookupError, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the weather lookup pipeline.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a city name into weather records: the first element is the
    /// current conditions, the rest are forecast days (at most 5, one per
    /// distinct calendar date). Never returns partial results.
    async fn resolve_weather(&self, city: &str) -> Result<Vec<WeatherRecord>, LookupError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    Ok(Box::new(OpenWeatherClient::new(config.base_url().to_owned(), api_key.to_owned())))
}
