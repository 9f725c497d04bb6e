use crate::error::Result;
use crate::models::Station;
use crate::readers::columns::{find_column, line_of, CoordinateColumns};
use crate::utils::constants::STATION_ID_COLUMNS;
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::{info, warn};

/// Reads station metadata. Rows are returned as-is, including repeated rows for the
/// same station; deduplication happens in the scorer.
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let id_column = find_column(&headers, STATION_ID_COLUMNS, path)?;
        let columns = CoordinateColumns::locate(&headers, path)?;

        let mut stations = Vec::new();
        for record in reader.records() {
            let record = record?;
            let id = record.get(id_column).unwrap_or("").trim();
            if id.is_empty() {
                warn!("{}:{}: row without station id, skipping", path.display(), line_of(&record));
                continue;
            }

            match columns.parse(&record, path)? {
                Some(coordinate) => stations.push(Station {
                    id: id.to_string(),
                    coordinate,
                }),
                None => warn!(
                    "{}:{}: station {} has no coordinates, skipping",
                    path.display(),
                    line_of(&record),
                    id
                ),
            }
        }

        info!("Loaded {} station rows from {}", stations.len(), path.display());
        Ok(stations)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
