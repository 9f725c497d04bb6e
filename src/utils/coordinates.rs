use crate::error::{ProcessingError, Result};
use crate::utils::constants::EARTH_RADIUS_KM;

/// Convert DMS (Degrees:Minutes:Seconds) format to decimal degrees
///
/// # Examples
/// ```
/// use proximity_labeler::utils::dms_to_decimal;
///
/// let decimal = dms_to_decimal("50:30:15").unwrap();
/// assert!((decimal - 50.504167).abs() < 0.000001);
/// ```
pub fn dms_to_decimal(dms: &str) -> Result<f64> {
    let parts: Vec<&str> = dms.split(':').collect();

    if parts.len() != 3 {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Invalid DMS format: '{}'. Expected format: 'DD:MM:SS'",
            dms
        )));
    }

    let is_negative = dms.starts_with('-');

    let mut values = [0.0f64; 3];
    for (slot, (part, unit)) in values
        .iter_mut()
        .zip(parts.iter().zip(["degrees", "minutes", "seconds"]))
    {
        *slot = part.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidCoordinate(format!("Invalid {} value: '{}'", unit, part))
        })?;
    }
    let [degrees, minutes, seconds] = values;

    if !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Minutes and seconds must be between 0 and 60 in '{}'",
            dms
        )));
    }

    let decimal_value = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    Ok(if is_negative { -decimal_value } else { decimal_value })
}

/// Parse coordinate that might be in DMS or decimal format
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    if trimmed.contains(':') {
        return dms_to_decimal(trimmed);
    }

    let value = trimmed.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })?;
    if !value.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Coordinate must be finite, got: '{}'",
            coord_str
        )));
    }
    Ok(value)
}

/// Great-circle distance in kilometres between two points given in degrees (haversine)
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push `a` just past 1.0 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dms_to_decimal() {
        assert!((dms_to_decimal("50:30:15").unwrap() - 50.504167).abs() < 0.000001);
        assert!((dms_to_decimal("-0:07:39").unwrap() - -0.1275).abs() < 0.0001);
    }

    #[test]
    fn test_invalid_dms_format() {
        assert!(dms_to_decimal("50:30").is_err());
        assert!(dms_to_decimal("50:70:15").is_err());
        assert!(dms_to_decimal("50:30:x").is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("51.5074").unwrap() - 51.5074).abs() < 0.000001);
        assert!((parse_coordinate("50:30:15").unwrap() - 50.504167).abs() < 0.000001);
        assert!((parse_coordinate(" -0.1278 ").unwrap() - -0.1278).abs() < 0.000001);
        assert!(parse_coordinate("north").is_err());
        assert!(parse_coordinate("NaN").is_err());
    }

    #[test]
    fn test_haversine_distance() {
        // London to Edinburgh
        let distance = haversine_distance(51.5074, -0.1278, 55.9533, -3.1883);
        assert!((distance - 534.0).abs() < 10.0);
    }

    #[test]
    fn test_haversine_symmetric_and_zero() {
        let points = [
            (0.0, 0.0),
            (36.1, -97.5),
            (-33.9, 151.2),
            (89.9, 179.9),
            (-89.9, -179.9),
        ];
        for &(lat1, lon1) in &points {
            assert_eq!(haversine_distance(lat1, lon1, lat1, lon1), 0.0);
            for &(lat2, lon2) in &points {
                let ab = haversine_distance(lat1, lon1, lat2, lon2);
                let ba = haversine_distance(lat2, lon2, lat1, lon1);
                assert!(ab >= 0.0);
                assert!((ab - ba).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // 2 * pi * 6371 / 360
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((distance - 111.19492664455873).abs() < 1e-6);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!(distance.is_finite());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
