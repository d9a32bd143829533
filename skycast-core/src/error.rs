use std::path::PathBuf;
use thiserror::Error;

/// Which of the two outbound calls a [`FetchError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Geocode,
    Forecast,
}

impl FetchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStage::Geocode => "geocode",
            FetchStage::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while talking to the weather provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{stage} request failed")]
    Transport {
        stage: FetchStage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} request failed with status {status}: {body}")]
    Status {
        stage: FetchStage,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {stage} response")]
    Malformed {
        stage: FetchStage,
        #[source]
        source: serde_json::Error,
    },

    #[error("forecast series for \"{city}\" was empty")]
    EmptyResult { city: String },
}

impl FetchError {
    /// Stage tag as reported to callers: "geocode", "forecast" or
    /// "empty-result".
    pub fn stage(&self) -> &'static str {
        match self {
            FetchError::Transport { stage, .. }
            | FetchError::Status { stage, .. }
            | FetchError::Malformed { stage, .. } => stage.as_str(),
            FetchError::EmptyResult { .. } => "empty-result",
        }
    }
}

/// Failure while reducing a parsed forecast series.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("forecast series contained no entries")]
    EmptySeries,

    #[error("forecast entry at {timestamp} carried no weather condition")]
    MissingCondition { timestamp: String },

    #[error("forecast entry carried unusable timestamp {timestamp:?}")]
    BadTimestamp { timestamp: String },
}

/// End-to-end lookup failure: either of the two fetch calls, or the
/// reduction of their payload.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

/// Failure of a search-history operation.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("\"{0}\" is already in the search history")]
    Duplicate(String),

    #[error("no search history entry with id {0}")]
    NotFound(String),

    #[error("failed to access history file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode search history")]
    Serialize(#[from] serde_json::Error),
}
