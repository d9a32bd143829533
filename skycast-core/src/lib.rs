//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The geocoding + forecast client for the weather provider
//! - The pure reducer mapping a forecast series to weather records
//! - The persisted search-history store
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod reduce;

pub use config::Config;
pub use error::{FetchError, FetchStage, HistoryError, LookupError, ReduceError};
pub use history::HistoryStore;
pub use model::{Coordinates, ForecastEntry, HistoryEntry, WeatherRecord};
pub use provider::{WeatherProvider, provider_from_config};
pub use reduce::{Reduced, reduce};
