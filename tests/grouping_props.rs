use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use venue_match_lambda_rust::grouping::{group_by_time, group_by_venue, Bucket, DayWindow};
use venue_match_lambda_rust::model::{Match, Venue};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 30, 12, 0, 0).unwrap()
}

// Offsets in minutes from the reference, venue ids from a small pool so venues repeat
fn build(rows: &[(Option<i64>, Option<i64>)]) -> Vec<Match> {
    rows.iter()
        .enumerate()
        .map(|(i, (offset, venue_id))| Match {
            id: i as i64,
            url: None,
            time: offset.map(|m| reference() + Duration::minutes(m)),
            home_team: None,
            away_team: None,
            venue: Some(Venue { id: *venue_id, address: None, latitude: Some(50.0), longitude: Some(8.0) }),
            age_group: None,
            competition: None,
        })
        .collect()
}

fn rows() -> impl Strategy<Value = Vec<(Option<i64>, Option<i64>)>> {
    // Coarse offsets so equal kickoffs show up often
    let offset = prop::option::of((-200i64..200).prop_map(|m| m * 15));
    let venue = prop::option::of(1i64..6);
    prop::collection::vec((offset, venue), 0..80)
}

fn assert_sorted_and_stable(matches: &[Match]) -> Result<(), TestCaseError> {
    for pair in matches.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let key_a = (a.time.is_none(), a.time);
        let key_b = (b.time.is_none(), b.time);
        prop_assert!(key_a <= key_b, "bucket out of order: {} before {}", a.id, b.id);
        if key_a == key_b {
            prop_assert!(a.id < b.id, "equal kickoffs lost input order: {} before {}", a.id, b.id);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn buckets_partition_the_input(rows in rows()) {
        let matches = build(&rows);
        let grouped = group_by_time(matches.clone(), reference());

        prop_assert_eq!(grouped.len(), matches.len());

        let mut seen: Vec<i64> = grouped.today.iter()
            .chain(&grouped.upcoming)
            .chain(&grouped.past)
            .map(|m| m.id)
            .collect();
        seen.sort();
        prop_assert_eq!(seen, matches.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn buckets_agree_with_classifier_and_are_ordered(rows in rows()) {
        let window = DayWindow::containing(reference());
        let grouped = group_by_time(build(&rows), reference());

        for bucket in [Bucket::Today, Bucket::Upcoming, Bucket::Past] {
            for m in grouped.bucket(bucket) {
                prop_assert_eq!(window.classify(m.time), bucket);
            }
            assert_sorted_and_stable(grouped.bucket(bucket))?;
        }
        prop_assert!(grouped.past.iter().all(|m| m.time.is_none() || m.time < Some(window.start)));
    }

    #[test]
    fn venue_groups_cover_eligible_matches(rows in rows()) {
        let matches = build(&rows);
        let eligible = matches.iter().filter(|m| m.venue.as_ref().and_then(|v| v.id).is_some()).count();
        let groups = group_by_venue(matches, reference());

        prop_assert_eq!(groups.iter().map(|g| g.count).sum::<usize>(), eligible);
        for pair in groups.windows(2) {
            prop_assert!(pair[0].venue_id < pair[1].venue_id);
        }
        for g in &groups {
            prop_assert_eq!(g.count, g.matches.len());
            for m in g.matches.today.iter().chain(&g.matches.upcoming).chain(&g.matches.past) {
                prop_assert_eq!(m.venue.as_ref().and_then(|v| v.id), Some(g.venue_id));
            }
        }
    }
}
