use crate::error::{ProcessingError, Result};
use crate::models::{ReferencePoint, Station, StationScore, StationScores};
use crate::processors::nearest_k::closest_k_average;
use crate::processors::normalizer::normalize;
use crate::utils::constants::{DEFAULT_K, SCORING_LOG_INTERVAL};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Closest-k average distance per station plus the run-wide maximum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceSummary {
    pub k: usize,
    pub distances: BTreeMap<String, f64>,
    pub max_distance_km: f64,
}

impl DistanceSummary {
    /// Turn the raw distances into normalized scores using the shared maximum.
    ///
    /// An empty summary yields an empty score table.
    pub fn normalize(&self) -> Result<StationScores> {
        let mut scores = StationScores::new(self.k, self.max_distance_km);
        if self.distances.is_empty() {
            return Ok(scores);
        }

        for (station_id, &avg_distance_km) in &self.distances {
            let score = normalize(avg_distance_km, self.max_distance_km)?;
            scores.insert(
                station_id.clone(),
                StationScore {
                    avg_distance_km,
                    score,
                },
            );
        }

        Ok(scores)
    }
}

pub struct StationScorer {
    k: usize,
    max_workers: usize,
}

impl StationScorer {
    pub fn new(k: usize) -> Self {
        Self { k, max_workers: 1 }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Compute every station's closest-k average distance and the maximum over all of them.
    ///
    /// Stations are deduplicated by id. Any station failing to produce an average
    /// fails the whole run, since the maximum would be undefined.
    pub fn compute_distances(
        &self,
        stations: &[Station],
        references: &[ReferencePoint],
        progress: Option<&ProgressReporter>,
    ) -> Result<DistanceSummary> {
        let unique = unique_stations(stations);
        let total = unique.len();
        info!(
            "Computing closest-{} averages for {} stations against {} reference points",
            self.k,
            total,
            references.len()
        );

        if let Some(p) = progress {
            p.set_length(total as u64);
            p.set_message(&format!("Scoring {} stations...", total));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let processed = AtomicUsize::new(0);
        let averages: Result<Vec<(String, f64)>> = pool.install(|| {
            unique
                .par_iter()
                .map(|station| -> Result<(String, f64)> {
                    let average = closest_k_average(&station.coordinate, references, self.k)
                        .map_err(|e| match e {
                            ProcessingError::InsufficientData(msg) => {
                                ProcessingError::InsufficientData(format!(
                                    "station {}: {}",
                                    station.id, msg
                                ))
                            }
                            other => other,
                        })?;

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % SCORING_LOG_INTERVAL == 0 {
                        debug!("Processed {}/{} stations", count, total);
                    }
                    if let Some(p) = progress {
                        p.increment(1);
                    }

                    Ok((station.id.clone(), average))
                })
                .collect()
        });

        // Every average is known past this point
        let distances: BTreeMap<String, f64> = averages?.into_iter().collect();
        let max_distance_km = distances.values().copied().fold(0.0, f64::max);

        if !distances.is_empty() {
            info!(
                "Maximum closest-{} average distance: {:.2} km",
                self.k, max_distance_km
            );
        }

        Ok(DistanceSummary {
            k: self.k,
            distances,
            max_distance_km,
        })
    }

    /// Distances, then normalization against the run-wide maximum
    pub fn score(
        &self,
        stations: &[Station],
        references: &[ReferencePoint],
        progress: Option<&ProgressReporter>,
    ) -> Result<StationScores> {
        let summary = self.compute_distances(stations, references, progress)?;
        let scores = summary.normalize()?;

        if let Some(p) = progress {
            p.finish_with_message(&format!("Scored {} stations", scores.len()));
        }
        Ok(scores)
    }
}

impl Default for StationScorer {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

/// First row per station id, in input order. Later rows with a different
/// coordinate are reported and ignored.
fn unique_stations(stations: &[Station]) -> Vec<&Station> {
    let mut seen: HashMap<&str, &Station> = HashMap::with_capacity(stations.len());
    let mut unique = Vec::new();

    for station in stations {
        match seen.get(station.id.as_str()) {
            Some(first) => {
                if first.coordinate != station.coordinate {
                    warn!(
                        "Station {} listed at ({}, {}) and ({}, {}); using the first",
                        station.id,
                        first.coordinate.latitude,
                        first.coordinate.longitude,
                        station.coordinate.latitude,
                        station.coordinate.longitude
                    );
                }
            }
            None => {
                seen.insert(&station.id, station);
                unique.push(station);
            }
        }
    }

    unique
}
