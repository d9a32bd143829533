//! Reduction of a provider forecast series into the records callers see:
//! one current-conditions record plus at most one record per calendar day,
//! capped at [`MAX_FORECAST_DAYS`] distinct days.

use chrono::{DateTime, NaiveDate};

use crate::error::ReduceError;
use crate::model::{ForecastEntry, WeatherRecord};

/// Distinct-date cap on the reduced forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Output of [`reduce`]: current conditions plus the deduplicated forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub current: WeatherRecord,
    pub forecast: Vec<WeatherRecord>,
}

impl Reduced {
    /// Flatten into the `[current, forecast...]` sequence the lookup
    /// contract promises.
    pub fn into_records(self) -> Vec<WeatherRecord> {
        let mut records = Vec::with_capacity(1 + self.forecast.len());
        records.push(self.current);
        records.extend(self.forecast);
        records
    }
}

/// Reduce a time-ordered forecast series.
///
/// `current` is the transform of the first entry, dated from its numeric
/// Unix timestamp (UTC). The forecast keeps the first entry seen for each
/// distinct calendar date, keyed on the date portion of `dt_txt` rather
/// than the numeric timestamp so the provider's own day boundaries are
/// respected. Entries for already-seen dates are skipped without counting
/// against the cap.
pub fn reduce(city: &str, series: &[ForecastEntry]) -> Result<Reduced, ReduceError> {
    let first = series.first().ok_or(ReduceError::EmptySeries)?;

    let current_date = DateTime::from_timestamp(first.dt, 0)
        .ok_or_else(|| ReduceError::BadTimestamp { timestamp: first.dt.to_string() })?
        .date_naive();
    let current = to_record(city, current_date, first)?;

    let mut forecast = Vec::with_capacity(MAX_FORECAST_DAYS);
    let mut seen_dates: Vec<NaiveDate> = Vec::with_capacity(MAX_FORECAST_DAYS);

    for entry in series {
        let date = text_date(entry)?;
        if !seen_dates.contains(&date) && seen_dates.len() < MAX_FORECAST_DAYS {
            seen_dates.push(date);
            forecast.push(to_record(city, date, entry)?);
        }
    }

    Ok(Reduced { current, forecast })
}

/// Kelvin to Fahrenheit, rounded to 2 decimal places (half away from zero).
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    let fahrenheit = (kelvin - 273.15) * 9.0 / 5.0 + 32.0;
    (fahrenheit * 100.0).round() / 100.0
}

fn to_record(city: &str, date: NaiveDate, entry: &ForecastEntry) -> Result<WeatherRecord, ReduceError> {
    let condition = entry
        .weather
        .first()
        .ok_or_else(|| ReduceError::MissingCondition { timestamp: entry.dt_txt.clone() })?;

    Ok(WeatherRecord {
        city: city.to_string(),
        date,
        icon: condition.icon.clone(),
        description: condition.description.clone(),
        temperature_f: kelvin_to_fahrenheit(entry.main.temp),
        wind_speed: entry.wind.speed,
        humidity_pct: entry.main.humidity,
    })
}

/// Calendar date from the textual timestamp ("YYYY-MM-DD HH:MM:SS").
fn text_date(entry: &ForecastEntry) -> Result<NaiveDate, ReduceError> {
    let date_part = entry
        .dt_txt
        .split(' ')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReduceError::BadTimestamp { timestamp: entry.dt_txt.clone() })?;

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ReduceError::BadTimestamp { timestamp: entry.dt_txt.clone() })
}
