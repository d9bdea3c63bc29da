use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Venue {
    /// Venue id and coordinates when the venue can be placed on a map.
    pub fn position(&self) -> Option<(i64, f64, f64)> {
        match (self.id, self.latitude, self.longitude) {
            (Some(id), Some(lat), Some(lng)) => Some((id, lat, lng)),
            _ => None,
        }
    }
}
