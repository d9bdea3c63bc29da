use serde::{Deserialize, Serialize};

/// Id plus display name, the shape shared by competitions and age groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

pub type Competition = Named;
pub type AgeGroup = Named;
