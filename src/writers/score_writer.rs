use crate::error::Result;
use crate::models::StationScores;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    station_id: &'a str,
    avg_distance_km: f64,
    score: f64,
}

#[derive(Debug, Serialize)]
struct ScoreDocument<'a> {
    generated_at: DateTime<Utc>,
    k: usize,
    max_distance_km: f64,
    stations: Vec<ScoreRow<'a>>,
}

/// Writes the station score table as CSV, or as JSON when the path ends in `.json`
pub struct ScoreWriter;

impl ScoreWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, scores: &StationScores, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            self.write_json(scores, path)?;
        } else {
            self.write_csv(scores, path)?;
        }

        info!("Wrote {} station scores to {}", scores.len(), path.display());
        Ok(())
    }

    pub fn write_csv(&self, scores: &StationScores, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows(scores) {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_json(&self, scores: &StationScores, path: &Path) -> Result<()> {
        let document = ScoreDocument {
            generated_at: Utc::now(),
            k: scores.k,
            max_distance_km: scores.max_distance_km,
            stations: rows(scores).collect(),
        };

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &document)?;
        Ok(())
    }
}

impl Default for ScoreWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn rows(scores: &StationScores) -> impl Iterator<Item = ScoreRow<'_>> {
    scores.iter().map(|(station_id, s)| ScoreRow {
        station_id: station_id.as_str(),
        avg_distance_km: s.avg_distance_km,
        score: s.score,
    })
}
