use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info, info_span, instrument, warn};

use crate::error::FeedError;
use crate::model::{Match, RawMatch};
use crate::normalize::normalize_time;

/// Match rows fetched from the data-access layer, kickoffs normalized to UTC.
#[derive(Debug)]
pub struct MatchFeed {
    matches: Vec<Match>,
    // Rows whose time string could not be read; they keep an absent kickoff
    rejected_times: usize,
}

impl MatchFeed {
    /// GET the feed at `url` and normalize it, reading offset-less times in `zone`.
    #[instrument(level = "info", skip(zone))]
    pub fn fetch(url: &str, zone: Tz) -> Result<Self, FeedError> {
        let response = {
            let _span = info_span!("match_feed_fetch", url = %url).entered();
            ureq::get(url).call()
        };
        let response = response.inspect_err(|e| {
            error!(error = %e, url = %url, "Match feed request failed");
        })?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().inspect_err(|e| {
            error!(error = %e, status, "Failed to read match feed body");
        })?;
        let feed = Self::from_json(&body, zone)?;
        info!(status, matches = feed.matches.len(), rejected_times = feed.rejected_times, "Fetched match feed");
        Ok(feed)
    }

    /// Build from a raw JSON body (no network).
    pub fn from_json(body: &str, zone: Tz) -> Result<Self, FeedError> {
        let rows = Self::deserialize_rows(body).inspect_err(|e| {
            error!(error = %e, "Failed to deserialize match feed");
        })?;
        Ok(Self::from_rows(rows, zone))
    }

    pub fn from_rows(rows: Vec<RawMatch>, zone: Tz) -> Self {
        let mut rejected_times = 0;
        let matches = rows
            .into_iter()
            .map(|row| {
                let time = match row.time.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    None => None,
                    Some(raw) => match normalize_time(raw, zone) {
                        Ok(t) => Some(t),
                        Err(e) => {
                            warn!(match_id = row.id, error = %e, "Dropping unreadable kickoff; match is treated as past");
                            rejected_times += 1;
                            None
                        }
                    },
                };
                row.with_time(time)
            })
            .collect();
        Self { matches, rejected_times }
    }

    #[instrument(level = "info", skip(body), fields(bytes = body.len()))]
    fn deserialize_rows(body: &str) -> Result<Vec<RawMatch>, serde_json::Error> {
        serde_json::from_str::<Vec<RawMatch>>(body)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    pub fn rejected_times(&self) -> usize {
        self.rejected_times
    }

    /// Latest kickoff in the feed, if any match has one.
    pub fn latest_kickoff(&self) -> Option<DateTime<Utc>> {
        self.matches.iter().filter_map(|m| m.time).max()
    }
}
