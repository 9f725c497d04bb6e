use crate::utils::coordinates::haversine_distance;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A point of interest (e.g. a turbine) that stations are scored against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReferencePoint {
    #[validate(nested)]
    pub coordinate: Coordinate,
}

impl ReferencePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
        }
    }
}

impl From<Coordinate> for ReferencePoint {
    fn from(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(36.1, -97.5).validate().is_ok());
        assert!(Coordinate::new(91.0, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, -181.0).validate().is_err());
        assert!(ReferencePoint::new(-90.5, 0.0).validate().is_err());
    }

    #[test]
    fn test_distance_to() {
        let a = Coordinate::new(0.0, 0.5);
        let b = Coordinate::new(0.0, 0.0);
        let c = Coordinate::new(0.0, 1.0);

        assert_eq!(a.distance_to(&a), 0.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-12);
        assert!((a.distance_to(&b) - a.distance_to(&c)).abs() < 1e-9);
    }
}
