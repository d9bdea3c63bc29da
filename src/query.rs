//! Filtering that scopes a match list before it is grouped.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::model::{AgeGroup, Competition, Match, Venue};

/// Viewport and filter parameters of a match request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    #[serde(default)]
    pub min_lat: Option<f64>,
    #[serde(default)]
    pub max_lat: Option<f64>,
    #[serde(default)]
    pub min_lng: Option<f64>,
    #[serde(default)]
    pub max_lng: Option<f64>,
    #[serde(default)]
    pub min_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_date: Option<NaiveDate>,
    #[serde(default)]
    pub competitions: Option<Vec<i64>>,
    #[serde(default)]
    pub age_groups: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }

    fn is_valid(&self) -> bool {
        self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
            && self.min_lat >= -90.0
            && self.max_lat <= 90.0
            && self.min_lng >= -180.0
            && self.max_lng <= 180.0
    }
}

impl MatchQuery {
    /// The bounding box, only when all four bounds were given.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            min_lat: self.min_lat?,
            max_lat: self.max_lat?,
            min_lng: self.min_lng?,
            max_lng: self.max_lng?,
        })
    }

    /// The date range, only when both ends were given.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.min_date?, self.max_date?))
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if let Some(bbox) = self.bounding_box() {
            if !bbox.is_valid() {
                return Err(QueryError::InvalidBoundingBox {
                    min_lat: bbox.min_lat,
                    max_lat: bbox.max_lat,
                    min_lng: bbox.min_lng,
                    max_lng: bbox.max_lng,
                });
            }
        }
        if let Some((min, max)) = self.date_range() {
            if min > max {
                return Err(QueryError::InvalidDateRange { min, max });
            }
        }
        Ok(())
    }

    /// Everything except the viewport: date range, competitions, age groups.
    fn matches_filters(&self, m: &Match) -> bool {
        if let Some((min, max)) = self.date_range() {
            match m.time {
                Some(t) => {
                    let day = t.date_naive();
                    if day < min || day > max {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(ids) = &self.competitions {
            if !m.competition.as_ref().is_some_and(|c| ids.contains(&c.id)) {
                return false;
            }
        }
        if let Some(ids) = &self.age_groups {
            if !m.age_group.as_ref().is_some_and(|a| ids.contains(&a.id)) {
                return false;
            }
        }
        true
    }

    pub fn matches(&self, m: &Match) -> bool {
        if let Some(bbox) = self.bounding_box() {
            let inside = m
                .venue
                .as_ref()
                .and_then(|v| Some((v.latitude?, v.longitude?)))
                .is_some_and(|(lat, lng)| bbox.contains(lat, lng));
            if !inside {
                return false;
            }
        }
        self.matches_filters(m)
    }

    /// Keep the matches this query selects, in input order.
    pub fn apply(&self, matches: Vec<Match>) -> Vec<Match> {
        matches.into_iter().filter(|m| self.matches(m)).collect()
    }

    /// Scope to one venue. The viewport is ignored; the other filters apply.
    pub fn apply_for_venue(&self, venue_id: i64, matches: Vec<Match>) -> Vec<Match> {
        matches
            .into_iter()
            .filter(|m| m.venue.as_ref().and_then(|v| v.id) == Some(venue_id))
            .filter(|m| self.matches_filters(m))
            .collect()
    }
}

/// A venue that has at least one match in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLocation {
    pub venue: Venue,
}

/// Distinct venues of `matches`, ascending by id.
pub fn match_locations(matches: &[Match]) -> Vec<MatchLocation> {
    let mut venues: BTreeMap<i64, &Venue> = BTreeMap::new();
    for venue in matches.iter().filter_map(|m| m.venue.as_ref()) {
        if let Some(id) = venue.id {
            venues.entry(id).or_insert(venue);
        }
    }
    venues
        .into_values()
        .map(|venue| MatchLocation { venue: venue.clone() })
        .collect()
}

/// Values the front-end offers in its filter panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub min_date: Option<DateTime<Utc>>,
    pub max_date: Option<DateTime<Utc>>,
    pub competitions: Vec<Competition>,
    pub age_groups: Vec<AgeGroup>,
}

pub fn filter_options(matches: &[Match]) -> FilterOptions {
    let mut competitions: BTreeMap<i64, &Competition> = BTreeMap::new();
    let mut age_groups: BTreeMap<i64, &AgeGroup> = BTreeMap::new();
    for m in matches {
        if let Some(c) = &m.competition {
            competitions.entry(c.id).or_insert(c);
        }
        if let Some(a) = &m.age_group {
            age_groups.entry(a.id).or_insert(a);
        }
    }

    FilterOptions {
        min_date: matches.iter().filter_map(|m| m.time).min(),
        max_date: matches.iter().filter_map(|m| m.time).max(),
        competitions: competitions.into_values().cloned().collect(),
        age_groups: age_groups.into_values().cloned().collect(),
    }
}
