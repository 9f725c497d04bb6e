use crate::error::{ProcessingError, Result};
use crate::models::Coordinate;
use crate::utils::coordinates::parse_coordinate;
use csv::StringRecord;
use std::path::Path;
use validator::Validate;

/// Index of the first header matching one of `candidates` (case-insensitive)
pub fn find_column(headers: &StringRecord, candidates: &[&str], path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| {
            let h = h.trim();
            candidates.iter().any(|c| h.eq_ignore_ascii_case(c))
        })
        .ok_or_else(|| ProcessingError::MissingColumn {
            file: path.to_path_buf(),
            column: candidates.join("|"),
        })
}

/// Latitude/longitude column positions within a header row
#[derive(Debug, Clone, Copy)]
pub struct CoordinateColumns {
    pub latitude: usize,
    pub longitude: usize,
}

impl CoordinateColumns {
    pub fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        use crate::utils::constants::{LATITUDE_COLUMNS, LONGITUDE_COLUMNS};

        Ok(Self {
            latitude: find_column(headers, LATITUDE_COLUMNS, path)?,
            longitude: find_column(headers, LONGITUDE_COLUMNS, path)?,
        })
    }

    /// Parse and validate the coordinate of a row.
    ///
    /// `Ok(None)` when either cell is blank; a malformed or out-of-range value is an error
    /// naming the line.
    pub fn parse(&self, record: &StringRecord, path: &Path) -> Result<Option<Coordinate>> {
        let lat = record.get(self.latitude).unwrap_or("").trim();
        let lon = record.get(self.longitude).unwrap_or("").trim();
        if lat.is_empty() || lon.is_empty() {
            return Ok(None);
        }

        let line = line_of(record);
        let with_line = |e: ProcessingError| {
            ProcessingError::InvalidCoordinate(format!("{}:{}: {}", path.display(), line, e))
        };

        let coordinate = Coordinate::new(
            parse_coordinate(lat).map_err(with_line)?,
            parse_coordinate(lon).map_err(with_line)?,
        );
        coordinate.validate().map_err(|e| {
            ProcessingError::InvalidCoordinate(format!(
                "{}:{}: ({}, {}) is out of range: {}",
                path.display(),
                line,
                coordinate.latitude,
                coordinate.longitude,
                e
            ))
        })?;

        Ok(Some(coordinate))
    }
}

/// 1-based line number of a record, 0 when unknown
pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
