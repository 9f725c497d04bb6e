use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score for a single station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationScore {
    /// Mean distance to the station's k nearest reference points
    pub avg_distance_km: f64,
    /// `1 - avg_distance_km / max_distance_km`, closer stations score higher
    pub score: f64,
}

/// Station id -> normalized score lookup for one run.
///
/// Built once by the station scorer and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationScores {
    pub k: usize,
    pub max_distance_km: f64,
    pub scores: BTreeMap<String, StationScore>,
}

impl StationScores {
    pub fn new(k: usize, max_distance_km: f64) -> Self {
        Self {
            k,
            max_distance_km,
            scores: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, station_id: impl Into<String>, score: StationScore) {
        self.scores.insert(station_id.into(), score);
    }

    pub fn get(&self, station_id: &str) -> Option<&StationScore> {
        self.scores.get(station_id)
    }

    /// Normalized score for a station, `None` when the station is unscoreable
    pub fn score_for(&self, station_id: &str) -> Option<f64> {
        self.get(station_id).map(|s| s.score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StationScore)> {
        self.scores.iter()
    }
}
