use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A monitoring station as listed in the station metadata file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(nested)]
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }
}
