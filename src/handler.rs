use chrono_tz::Tz;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::error::{FeedError, QueryError};
use crate::feed::MatchFeed;
use crate::grouping::{group_by_time, group_by_venue, GroupedMatches, VenueGroup};
use crate::model::Match;
use crate::popup::{build_markers, build_popup_html, Marker};
use crate::query::{filter_options, match_locations, FilterOptions, MatchLocation, MatchQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Matches in the viewport, grouped per venue.
    Matches,
    /// One venue's matches, grouped by time.
    VenueMatches,
    /// One venue's matches rendered as popup HTML.
    Popup,
    Locations,
    Markers,
    FilterOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub action: Action,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub venue_id: Option<i64>,
    #[serde(default)]
    pub filters: MatchQuery,
}

impl Request {
    /// Reject bad parameters before anything is fetched.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.filters.validate()?;
        if matches!(self.action, Action::VenueMatches | Action::Popup) && self.venue_id.is_none() {
            return Err(QueryError::MissingVenueId);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuePopup {
    pub venue_id: i64,
    pub count: usize,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Venues(Vec<VenueGroup>),
    Venue(GroupedMatches),
    Popup(VenuePopup),
    Locations(Vec<MatchLocation>),
    Markers(Vec<Marker>),
    FilterOptions(FilterOptions),
}

/// Answer `request` from an already fetched match list.
pub fn respond(request: &Request, matches: Vec<Match>, clock: &impl Clock, zone: Tz) -> Result<Response, QueryError> {
    request.validate()?;
    let filters = &request.filters;
    let reference = clock.now();

    let response = match request.action {
        Action::Matches => Response::Venues(group_by_venue(filters.apply(matches), reference)),
        Action::VenueMatches => {
            let venue_id = request.venue_id.ok_or(QueryError::MissingVenueId)?;
            Response::Venue(group_by_time(filters.apply_for_venue(venue_id, matches), reference))
        }
        Action::Popup => {
            let venue_id = request.venue_id.ok_or(QueryError::MissingVenueId)?;
            let scoped = filters.apply_for_venue(venue_id, matches);
            let venue = scoped.first().and_then(|m| m.venue.clone());
            let grouped = group_by_time(scoped, reference);
            Response::Popup(VenuePopup {
                venue_id,
                count: grouped.len(),
                html: build_popup_html(&grouped, venue.as_ref(), zone),
            })
        }
        Action::Locations => Response::Locations(match_locations(&filters.apply(matches))),
        Action::Markers => Response::Markers(build_markers(&match_locations(&filters.apply(matches)))),
        Action::FilterOptions => Response::FilterOptions(filter_options(&matches)),
    };
    Ok(response)
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let request = event.payload;
    let settings = Settings::from_env()?;

    if let Err(e) = request.validate() {
        warn!(error = %e, action = ?request.action, "Rejected request");
        return Err(e.into());
    }

    let feed_url = settings
        .resolve_feed_url(request.feed_url.as_deref())
        .ok_or(FeedError::MissingUrl)?
        .to_string();
    let zone = settings.time_zone;

    // ureq blocks; keep it off the runtime threads
    let feed = tokio::task::spawn_blocking(move || MatchFeed::fetch(&feed_url, zone)).await??;
    info!(
        matches = feed.matches().len(),
        latest_kickoff = ?feed.latest_kickoff(),
        action = ?request.action,
        "Answering request"
    );

    Ok(respond(&request, feed.into_matches(), &SystemClock, zone)?)
}
