use std::env;

use chrono_tz::Tz;
use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Berlin;

/// Runtime settings read from the Lambda environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub feed_url: Option<String>,
    /// Zone used for offset-less feed timestamps and for rendering popups.
    pub time_zone: Tz,
}

impl Default for Settings {
    fn default() -> Self {
        Self { feed_url: None, time_zone: DEFAULT_TIME_ZONE }
    }
}

impl Settings {
    /// Read `MATCH_FEED_URL` and `MATCH_TIME_ZONE`; both are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let feed_url = env::var("MATCH_FEED_URL").ok().filter(|s| !s.trim().is_empty());
        let time_zone = match env::var("MATCH_TIME_ZONE") {
            Ok(name) if !name.trim().is_empty() => parse_time_zone(&name)?,
            _ => DEFAULT_TIME_ZONE,
        };
        info!(time_zone = %time_zone, has_feed_url = feed_url.is_some(), "Loaded settings");
        Ok(Self { feed_url, time_zone })
    }

    /// The payload's feed URL wins over the configured one.
    pub fn resolve_feed_url<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.filter(|s| !s.trim().is_empty()).or(self.feed_url.as_deref())
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz, ConfigError> {
    name.trim().parse::<Tz>().map_err(|e| ConfigError::TimeZone {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
