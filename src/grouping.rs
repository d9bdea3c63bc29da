//! Today / upcoming / past bucketing of matches.
//!
//! Every decision is made against an explicit UTC reference instant. "Today" is
//! the half-open UTC calendar day `[start, start + 1 day)` containing it.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Match, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Today,
    Upcoming,
    Past,
}

/// The UTC calendar day containing a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    /// Exclusive. `None` when the next midnight is past the last representable instant.
    pub end: Option<DateTime<Utc>>,
}

impl DayWindow {
    pub fn containing(reference: DateTime<Utc>) -> Self {
        let start = reference.date_naive().and_time(NaiveTime::MIN).and_utc();
        Self { start, end: start.checked_add_signed(Duration::days(1)) }
    }

    pub fn classify(&self, time: Option<DateTime<Utc>>) -> Bucket {
        match (time, self.end) {
            (None, _) => Bucket::Past,
            (Some(t), _) if t < self.start => Bucket::Past,
            (Some(t), Some(end)) if t >= end => Bucket::Upcoming,
            (Some(_), _) => Bucket::Today,
        }
    }
}

/// Classify a single kickoff against `reference`.
pub fn classify(time: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> Bucket {
    DayWindow::containing(reference).classify(time)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedMatches {
    pub today: Vec<Match>,
    pub upcoming: Vec<Match>,
    pub past: Vec<Match>,
}

impl GroupedMatches {
    pub fn len(&self) -> usize {
        self.today.len() + self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Match] {
        match bucket {
            Bucket::Today => &self.today,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Past => &self.past,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Match> {
        match bucket {
            Bucket::Today => &mut self.today,
            Bucket::Upcoming => &mut self.upcoming,
            Bucket::Past => &mut self.past,
        }
    }
}

/// Buckets for one venue, as served to the map popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueGroup {
    pub venue_id: i64,
    pub venue: Venue,
    pub count: usize,
    #[serde(flatten)]
    pub matches: GroupedMatches,
}

/// Split `matches` into today / upcoming / past, each ascending by kickoff.
///
/// Matches without a kickoff go to past, after every timed past match. Ties keep
/// their input order.
pub fn group_by_time<I>(matches: I, reference: DateTime<Utc>) -> GroupedMatches
where
    I: IntoIterator<Item = Match>,
{
    let window = DayWindow::containing(reference);
    let mut grouped = GroupedMatches::default();
    for m in matches {
        let bucket = window.classify(m.time);
        grouped.bucket_mut(bucket).push(m);
    }

    // sort_by_key is stable; (false, t) < (true, _) puts absent kickoffs last
    for bucket in [Bucket::Today, Bucket::Upcoming, Bucket::Past] {
        grouped.bucket_mut(bucket).sort_by_key(|m| (m.time.is_none(), m.time));
    }
    grouped
}

/// Group matches per venue, ascending by venue id.
///
/// Matches whose venue lacks an id or either coordinate are dropped. Venue
/// metadata comes from the first match seen for each id.
pub fn group_by_venue<I>(matches: I, reference: DateTime<Utc>) -> Vec<VenueGroup>
where
    I: IntoIterator<Item = Match>,
{
    let mut partitions: BTreeMap<i64, (Venue, Vec<Match>)> = BTreeMap::new();
    for m in matches {
        let Some(venue) = m.venue.as_ref() else { continue };
        let Some((venue_id, _, _)) = venue.position() else { continue };
        partitions
            .entry(venue_id)
            .or_insert_with(|| (venue.clone(), Vec::new()))
            .1
            .push(m);
    }

    partitions
        .into_iter()
        .map(|(venue_id, (venue, venue_matches))| {
            let count = venue_matches.len();
            VenueGroup { venue_id, venue, count, matches: group_by_time(venue_matches, reference) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn window_is_utc_calendar_day() {
        let reference = Utc.with_ymd_and_hms(2025, 8, 30, 23, 59, 59).unwrap();
        let window = DayWindow::containing(reference);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 8, 30, 0, 0, 0).unwrap());
        assert_eq!(window.end, Some(Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap()));
    }

    #[test]
    fn reference_at_midnight_opens_a_new_day() {
        let reference = Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap();
        let yesterday_evening = Utc.with_ymd_and_hms(2025, 8, 30, 22, 0, 0).unwrap();
        assert_eq!(classify(Some(reference), reference), Bucket::Today);
        assert_eq!(classify(Some(yesterday_evening), reference), Bucket::Past);
    }

    #[test]
    fn last_representable_day_has_no_upcoming() {
        let reference = DateTime::<Utc>::MAX_UTC;
        let window = DayWindow::containing(reference);
        assert_eq!(window.end, None);
        assert_eq!(classify(Some(reference), reference), Bucket::Today);
        assert_eq!(classify(Some(window.start), reference), Bucket::Today);
        assert_eq!(classify(Some(window.start - Duration::seconds(1)), reference), Bucket::Past);
        assert_eq!(classify(None, reference), Bucket::Past);

        let m = Match {
            id: 1,
            url: None,
            time: Some(reference),
            home_team: None,
            away_team: None,
            venue: Some(Venue { id: Some(1), address: None, latitude: Some(52.0), longitude: Some(13.0) }),
            age_group: None,
            competition: None,
        };
        let groups = group_by_venue(vec![m], reference);
        assert_eq!(groups[0].matches.today.len(), 1);
        assert!(groups[0].matches.upcoming.is_empty());
    }

    #[test]
    fn first_representable_day_classifies() {
        let reference = DateTime::<Utc>::MIN_UTC;
        assert_eq!(classify(Some(reference), reference), Bucket::Today);
        assert_eq!(classify(Some(reference + Duration::days(2)), reference), Bucket::Upcoming);
    }
}
