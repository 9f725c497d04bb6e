use crate::error::Result;
use crate::models::StationSeries;
use crate::utils::constants::TIME_COLUMN;
use csv::WriterBuilder;
use std::path::Path;

/// Writes one station's time series as a wide CSV: `time` followed by one column
/// per measurement
pub struct SeriesWriter;

impl SeriesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of data rows written
    pub fn write(&self, series: &StationSeries, columns: &[String], path: &Path) -> Result<usize> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

        let mut header = Vec::with_capacity(columns.len() + 1);
        header.push(TIME_COLUMN);
        header.extend(columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        let mut written = 0;
        for row in series.rows(columns) {
            writer.write_record(&row)?;
            written += 1;
        }

        writer.flush()?;
        Ok(written)
    }
}

impl Default for SeriesWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_series_with_gaps() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ACME_measurements.csv");

        let mut series = StationSeries::new("ACME");
        series.insert("2024-01-01", "wind", Some(2.5));
        series.insert("2024-01-02", "temp", Some(-1.0));

        let columns = vec!["temp".to_string(), "wind".to_string(), "rain".to_string()];
        let rows = SeriesWriter::new().write(&series, &columns, &path)?;

        assert_eq!(rows, 2);
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "time,temp,wind,rain\n2024-01-01,,2.5,\n2024-01-02,-1.0,,\n"
        );
        Ok(())
    }
}
