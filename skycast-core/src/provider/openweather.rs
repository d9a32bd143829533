use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{FetchError, FetchStage, LookupError};
use crate::model::{Coordinates, ForecastEntry, WeatherRecord};
use crate::reduce;

use super::WeatherProvider;

/// Client for OpenWeather-shaped forecast endpoints.
///
/// Both pipeline calls hit `{base}/data/2.5/forecast`: the geocode step
/// queries by city name and extracts the coordinates nested under
/// `city.coord`, the forecast step queries by those coordinates. Two
/// strictly sequential calls per lookup, no retries, no caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key, http: Client::new() }
    }

    fn forecast_url(&self) -> String {
        format!("{}/data/2.5/forecast", self.base_url)
    }

    async fn fetch(
        &self,
        stage: FetchStage,
        query: &[(&str, &str)],
    ) -> Result<ForecastEnvelope, FetchError> {
        let res = self
            .http
            .get(self.forecast_url())
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport { stage, source: e })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| FetchError::Transport { stage, source: e })?;

        if !status.is_success() {
            return Err(FetchError::Status { stage, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Malformed { stage, source: e })
    }

    async fn geocode(&self, city: &str) -> Result<Coordinates, FetchError> {
        tracing::debug!(city, "resolving city coordinates");

        let envelope = self
            .fetch(FetchStage::Geocode, &[("q", city), ("appid", self.api_key.as_str())])
            .await?;

        Ok(envelope.city.coord)
    }

    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        tracing::debug!(lat = coordinates.lat, lon = coordinates.lon, "fetching forecast series");

        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();
        let envelope = self
            .fetch(
                FetchStage::Forecast,
                &[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str())],
            )
            .await?;

        Ok(envelope.list)
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    coord: Coordinates,
}

#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    city: OwCity,
    /// Absent on some error-shaped bodies; treated the same as empty.
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn resolve_weather(&self, city: &str) -> Result<Vec<WeatherRecord>, LookupError> {
        let coordinates = self.geocode(city).await?;
        let series = self.fetch_forecast(coordinates).await?;

        if series.is_empty() {
            return Err(FetchError::EmptyResult { city: city.to_string() }.into());
        }

        let reduced = reduce::reduce(city, &series)?;

        tracing::debug!(city, forecast_days = reduced.forecast.len(), "lookup resolved");
        Ok(reduced.into_records())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
