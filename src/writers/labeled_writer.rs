use crate::error::{ProcessingError, Result};
use crate::models::MeasurementTable;
use crate::utils::format::format_value;
use csv::{StringRecord, WriterBuilder};
use std::fs;
use std::path::Path;

/// Writes a measurement table with one extra constant-valued label column
pub struct LabeledCsvWriter {
    label_column: String,
}

impl LabeledCsvWriter {
    pub fn new(label_column: impl Into<String>) -> Self {
        Self {
            label_column: label_column.into(),
        }
    }

    /// Write `table` to `path` with `score` appended to every row.
    ///
    /// Rows keep their order and cell text. A file that fails mid-write is removed.
    pub fn write(&self, table: &MeasurementTable, score: f64, path: &Path) -> Result<()> {
        if table.has_column(&self.label_column) {
            return Err(ProcessingError::InvalidFormat(format!(
                "column '{}' is already present",
                self.label_column
            )));
        }

        let result = self.write_rows(table, score, path);
        if result.is_err() && path.exists() {
            let _ = fs::remove_file(path);
        }
        result
    }

    fn write_rows(&self, table: &MeasurementTable, score: f64, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        let score_cell = format_value(score);

        let mut headers = table.headers.clone();
        headers.push_field(&self.label_column);
        writer.write_record(&headers)?;

        let mut labeled = StringRecord::new();
        for row in &table.rows {
            labeled.clone_from(row);
            labeled.push_field(&score_cell);
            writer.write_record(&labeled)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table() -> MeasurementTable {
        MeasurementTable::new(
            StringRecord::from(vec!["time", "temp", "wind"]),
            vec![
                StringRecord::from(vec!["2024-01-01", "1.50", ""]),
                StringRecord::from(vec!["2024-01-02", "", "3"]),
            ],
        )
    }

    #[test]
    fn test_write_appends_label_column() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("KS001_measurements.csv");

        LabeledCsvWriter::new("TurbineScore").write(&table(), 0.25, &path)?;

        let written = fs::read_to_string(&path)?;
        assert_eq!(
            written,
            "time,temp,wind,TurbineScore\n2024-01-01,1.50,,0.25\n2024-01-02,,3,0.25\n"
        );
        Ok(())
    }

    #[test]
    fn test_whole_score_keeps_decimal() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("KS002_measurements.csv");

        LabeledCsvWriter::new("TurbineScore").write(&table(), 1.0, &path)?;

        let written = fs::read_to_string(&path)?;
        assert!(written.starts_with("time,temp,wind,TurbineScore\n2024-01-01,1.50,,1.0\n"));
        Ok(())
    }

    #[test]
    fn test_existing_label_column_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");

        let result = LabeledCsvWriter::new("temp").write(&table(), 0.5, &path);

        assert!(result.is_err());
        assert!(!path.exists());
        Ok(())
    }
}
