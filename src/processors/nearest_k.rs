use crate::error::{ProcessingError, Result};
use crate::models::{Coordinate, ReferencePoint};

/// Mean distance (km) from `station` to its `k` nearest reference points.
///
/// With fewer than `k` reference points the mean is taken over all of them.
/// Ties are irrelevant: only the set of the `k` smallest distances enters the mean.
pub fn closest_k_average(
    station: &Coordinate,
    references: &[ReferencePoint],
    k: usize,
) -> Result<f64> {
    if k == 0 {
        return Err(ProcessingError::Config(
            "k must be at least 1".to_string(),
        ));
    }
    if references.is_empty() {
        return Err(ProcessingError::InsufficientData(
            "no reference points available to average".to_string(),
        ));
    }

    let mut distances: Vec<f64> = references
        .iter()
        .map(|r| station.distance_to(&r.coordinate))
        .collect();

    let take = k.min(distances.len());
    if take < distances.len() {
        // everything left of `take - 1` is no larger than it
        distances.select_nth_unstable_by(take - 1, f64::total_cmp);
    }

    let nearest = &distances[..take];
    Ok(nearest.iter().sum::<f64>() / take as f64)
}
