use crate::error::Result;
use crate::models::ReferencePoint;
use crate::readers::columns::{line_of, CoordinateColumns};
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::{info, warn};

/// Reads the reference point (e.g. turbine) file
pub struct ReferenceReader;

impl ReferenceReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every reference point with a complete coordinate.
    ///
    /// Rows with a blank latitude or longitude are skipped with a warning.
    pub fn read_references(&self, path: &Path) -> Result<Vec<ReferencePoint>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let columns = CoordinateColumns::locate(reader.headers()?, path)?;
        let mut references = Vec::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record?;
            match columns.parse(&record, path)? {
                Some(coordinate) => references.push(ReferencePoint::from(coordinate)),
                None => {
                    skipped += 1;
                    warn!(
                        "{}:{}: reference point without coordinates, skipping",
                        path.display(),
                        line_of(&record)
                    );
                }
            }
        }

        info!(
            "Loaded {} reference points from {} ({} skipped)",
            references.len(),
            path.display(),
            skipped
        );
        Ok(references)
    }
}

impl Default for ReferenceReader {
    fn default() -> Self {
        Self::new()
    }
}
