use thiserror::Error;

/// A feed timestamp that could not be turned into a UTC instant.
#[derive(Debug, Error, PartialEq)]
pub enum TimeParseError {
    #[error("unrecognized time format: {0:?}")]
    Format(String),
    #[error("local time {0} does not exist in {1}")]
    Nonexistent(String, String),
}

/// Rejected match query parameters.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("invalid bounding box: lat {min_lat}..{max_lat}, lng {min_lng}..{max_lng}")]
    InvalidBoundingBox {
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    },
    #[error("invalid date range: {min} is after {max}")]
    InvalidDateRange { min: chrono::NaiveDate, max: chrono::NaiveDate },
    #[error("venue_matches requires a venueId")]
    MissingVenueId,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no match feed URL configured")]
    MissingUrl,
    #[error("request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("failed to decode match feed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown time zone {name:?}: {reason}")]
    TimeZone { name: String, reason: String },
}
