use crate::error::{ProcessingError, Result};

/// Map a closest-k average distance onto [0, 1] against the run's maximum:
/// `1 - avg_distance / max_distance`, so the furthest station scores 0 and a
/// station on top of a reference point scores 1.
pub fn normalize(avg_distance: f64, max_distance: f64) -> Result<f64> {
    if max_distance.is_nan() || max_distance <= 0.0 {
        return Err(ProcessingError::Normalization { max_distance });
    }

    Ok(1.0 - avg_distance / max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(normalize(42.5, 42.5).unwrap(), 0.0);
        assert_eq!(normalize(0.0, 42.5).unwrap(), 1.0);
        assert!((normalize(10.0, 40.0).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_maximum_is_an_error() {
        for avg in [0.0, 1.0, 100.0] {
            assert!(matches!(
                normalize(avg, 0.0),
                Err(ProcessingError::Normalization { .. })
            ));
        }
        assert!(normalize(1.0, f64::NAN).is_err());
        assert!(normalize(1.0, -3.0).is_err());
    }
}
