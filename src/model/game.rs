use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::named::{AgeGroup, Competition};
use crate::model::team::Team;
use crate::model::venue::Venue;

/// A match with its kickoff already normalized to UTC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub home_team: Option<Team>,
    #[serde(default)]
    pub away_team: Option<Team>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub competition: Option<Competition>,
}

/// A match row as the feed delivers it; `time` may lack an offset.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatch {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub home_team: Option<Team>,
    #[serde(default)]
    pub away_team: Option<Team>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub competition: Option<Competition>,
}

impl RawMatch {
    /// Attach an already-normalized kickoff, moving everything else over unchanged.
    pub fn with_time(self, time: Option<DateTime<Utc>>) -> Match {
        Match {
            id: self.id,
            url: self.url,
            time,
            home_team: self.home_team,
            away_team: self.away_team,
            venue: self.venue,
            age_group: self.age_group,
            competition: self.competition,
        }
    }
}
