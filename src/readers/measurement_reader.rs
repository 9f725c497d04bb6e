use crate::error::{ProcessingError, Result};
use crate::models::{MeasurementPoint, MeasurementTable};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Reads measurement files, both the per-station wide files and the long-format
/// point exports they are built from
pub struct MeasurementReader;

impl MeasurementReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a per-station file completely. Cells are kept verbatim.
    pub fn read_table(&self, path: &Path) -> Result<MeasurementTable> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "{} has no header row",
                path.display()
            )));
        }

        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(MeasurementTable::new(headers, rows))
    }

    /// Read long-format points (`station,time,measurement,value`); blank values are `None`
    pub fn read_points(&self, path: &Path) -> Result<Vec<MeasurementPoint>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let mut points = Vec::new();
        for point in reader.deserialize::<MeasurementPoint>() {
            points.push(point?);
        }
        Ok(points)
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}
