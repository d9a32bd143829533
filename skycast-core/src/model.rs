use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic point produced by geocoding and consumed by the forecast
/// fetch. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One reduced weather observation: either current conditions (first entry
/// of the provider series) or one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    /// ISO-8601 calendar date (UTC).
    pub date: NaiveDate,
    pub icon: String,
    pub description: String,
    pub temperature_f: f64,
    pub wind_speed: f64,
    pub humidity_pct: u8,
}

/// One slot of the provider's time-ordered forecast series.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Unix seconds.
    pub dt: i64,
    /// Textual timestamp, "YYYY-MM-DD HH:MM:SS".
    pub dt_txt: String,
    pub weather: Vec<Condition>,
    pub main: MainMetrics,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    /// Kelvin, as the provider reports it.
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// One row of the persisted search history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    /// UUID v4 assigned at add time; never reused, never content-derived.
    pub id: String,
}
