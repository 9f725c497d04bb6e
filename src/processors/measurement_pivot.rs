use crate::error::{ProcessingError, Result};
use crate::models::{MeasurementPoint, StationSeries};
use crate::readers::MeasurementReader;
use crate::utils::constants::{
    DEFAULT_BATCH_PREFIX, DEFAULT_BATCH_SIZE, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_SUFFIX,
};
use crate::utils::filename::{batch_dir_name, is_safe_station_id, measurement_file_name};
use crate::utils::progress::ProgressReporter;
use crate::writers::SeriesWriter;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotReport {
    pub stations: usize,
    pub batches: usize,
    pub rows_written: usize,
    pub points_ignored: usize,
    pub stations_rejected: usize,
}

/// Long-format points grouped per station, with the output column order
#[derive(Debug, Clone, Default)]
pub struct PivotedSeries {
    pub columns: Vec<String>,
    pub stations: BTreeMap<String, StationSeries>,
    pub points_ignored: usize,
}

/// Reshapes long-format `station,time,measurement,value` exports into one wide
/// file per station, partitioned into batch directories
pub struct MeasurementPivot {
    measurements: Option<Vec<String>>,
    batch_size: usize,
    batch_prefix: String,
    file_suffix: String,
    file_extension: String,
}

impl MeasurementPivot {
    pub fn new() -> Self {
        Self {
            measurements: None,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_prefix: DEFAULT_BATCH_PREFIX.to_string(),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }

    /// Fix the output columns; points for other measurements are dropped
    pub fn with_measurements(mut self, measurements: Vec<String>) -> Self {
        self.measurements = Some(measurements);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_batch_prefix(mut self, batch_prefix: &str) -> Self {
        self.batch_prefix = batch_prefix.to_string();
        self
    }

    pub fn with_file_pattern(mut self, file_suffix: &str, file_extension: &str) -> Self {
        self.file_suffix = file_suffix.to_string();
        self.file_extension = file_extension.to_string();
        self
    }

    /// Build the time -> measurement -> value mapping for every station
    pub fn group_points(&self, points: Vec<MeasurementPoint>) -> PivotedSeries {
        let declared: Option<HashSet<&str>> = self
            .measurements
            .as_ref()
            .map(|m| m.iter().map(String::as_str).collect());

        let mut columns: Vec<String> = self.measurements.clone().unwrap_or_default();
        let mut seen: HashSet<String> = columns.iter().cloned().collect();
        let mut stations: BTreeMap<String, StationSeries> = BTreeMap::new();
        let mut points_ignored = 0;

        for point in points {
            if let Some(declared) = &declared {
                if !declared.contains(point.measurement.as_str()) {
                    points_ignored += 1;
                    continue;
                }
            } else if !seen.contains(&point.measurement) {
                seen.insert(point.measurement.clone());
                columns.push(point.measurement.clone());
            }

            stations
                .entry(point.station.clone())
                .or_insert_with(|| StationSeries::new(point.station.clone()))
                .insert(&point.time, &point.measurement, point.value);
        }

        PivotedSeries {
            columns,
            stations,
            points_ignored,
        }
    }

    /// Read `input` and write the per-station files under `output_root`
    pub fn pivot_file(
        &self,
        input: &Path,
        output_root: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<PivotReport> {
        if self.batch_size == 0 {
            return Err(ProcessingError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }

        let points = MeasurementReader::new().read_points(input)?;
        info!("Read {} measurement points from {}", points.len(), input.display());

        let pivoted = self.group_points(points);
        self.write_batches(&pivoted, output_root, progress)
    }

    pub fn write_batches(
        &self,
        pivoted: &PivotedSeries,
        output_root: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<PivotReport> {
        let mut stations: Vec<&StationSeries> = Vec::with_capacity(pivoted.stations.len());
        let mut stations_rejected = 0;
        for series in pivoted.stations.values() {
            if is_safe_station_id(&series.station_id) {
                stations.push(series);
            } else {
                warn!(
                    "Station id {:?} cannot be used as a file name, skipping",
                    series.station_id
                );
                stations_rejected += 1;
            }
        }

        let writer = SeriesWriter::new();
        let mut report = PivotReport {
            stations: stations.len(),
            points_ignored: pivoted.points_ignored,
            stations_rejected,
            ..Default::default()
        };

        if let Some(p) = progress {
            p.set_length(stations.len() as u64);
        }

        for (index, chunk) in stations.chunks(self.batch_size.max(1)).enumerate() {
            let batch_dir = output_root.join(batch_dir_name(&self.batch_prefix, index + 1));
            fs::create_dir_all(&batch_dir)?;

            for series in chunk {
                let file_name =
                    measurement_file_name(&series.station_id, &self.file_suffix, &self.file_extension);
                report.rows_written +=
                    writer.write(series, &pivoted.columns, &batch_dir.join(file_name))?;

                if let Some(p) = progress {
                    p.increment(1);
                }
            }
            report.batches += 1;
        }

        info!(
            "Wrote {} stations into {} batches under {}",
            report.stations,
            report.batches,
            output_root.display()
        );
        Ok(report)
    }
}

impl Default for MeasurementPivot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn point(station: &str, time: &str, measurement: &str, value: Option<f64>) -> MeasurementPoint {
        MeasurementPoint {
            station: station.to_string(),
            time: time.to_string(),
            measurement: measurement.to_string(),
            value,
        }
    }

    #[test]
    fn test_columns_follow_first_appearance() {
        let pivoted = MeasurementPivot::new().group_points(vec![
            point("B", "t1", "wind", Some(1.0)),
            point("A", "t1", "temp", Some(2.0)),
            point("A", "t2", "wind", None),
        ]);

        assert_eq!(pivoted.columns, vec!["wind".to_string(), "temp".to_string()]);
        assert_eq!(pivoted.stations.len(), 2);
        assert_eq!(pivoted.stations["A"].len(), 2);
        assert_eq!(pivoted.points_ignored, 0);
    }

    #[test]
    fn test_declared_measurements_filter_points() {
        let pivoted = MeasurementPivot::new()
            .with_measurements(vec!["temp".to_string(), "rain".to_string()])
            .group_points(vec![
                point("A", "t1", "temp", Some(2.0)),
                point("A", "t1", "wind", Some(9.0)),
            ]);

        assert_eq!(pivoted.columns, vec!["temp".to_string(), "rain".to_string()]);
        assert_eq!(pivoted.points_ignored, 1);
    }

    #[test]
    fn test_pivot_file_writes_batches() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("points.csv");
        fs::write(
            &input,
            "station,time,measurement,value\n\
             C,2024-01-02,temp,3\n\
             A,2024-01-01,temp,1.5\n\
             B,2024-01-01,temp,\n\
             A,2024-01-01,rh,80\n\
             A,2024-01-02,rh,82\n",
        )?;
        let output = dir.path().join("out");

        let report = MeasurementPivot::new()
            .with_batch_size(2)
            .pivot_file(&input, &output, None)?;

        assert_eq!(
            report,
            PivotReport {
                stations: 3,
                batches: 2,
                rows_written: 4,
                points_ignored: 0,
                stations_rejected: 0,
            }
        );
        assert_eq!(
            fs::read_to_string(output.join("batch_001/A_measurements.csv"))?,
            "time,temp,rh\n2024-01-01,1.5,80.0\n2024-01-02,,82.0\n"
        );
        assert_eq!(
            fs::read_to_string(output.join("batch_001/B_measurements.csv"))?,
            "time,temp,rh\n2024-01-01,,\n"
        );
        assert!(output.join("batch_002/C_measurements.csv").exists());
        Ok(())
    }

    #[test]
    fn test_unsafe_station_ids_stay_inside_output_root() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("points.csv");
        fs::write(
            &input,
            "station,time,measurement,value\n\
             ../../escaped,t1,temp,1\n\
             north/east,t1,temp,2\n\
             ACME,t1,temp,3\n",
        )?;
        let output = dir.path().join("a").join("out");

        let report = MeasurementPivot::new().pivot_file(&input, &output, None)?;

        assert_eq!(report.stations, 1);
        assert_eq!(report.stations_rejected, 2);
        assert!(output.join("batch_001/ACME_measurements.csv").exists());
        assert!(!dir.path().join("a/escaped_measurements.csv").exists());
        assert!(!dir.path().join("escaped_measurements.csv").exists());
        assert_eq!(fs::read_dir(output.join("batch_001"))?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_custom_file_pattern() -> Result<()> {
        let dir = TempDir::new()?;
        let input = dir.path().join("points.csv");
        fs::write(&input, "station,time,measurement,value\nACME,t1,temp,3\n")?;
        let output = dir.path().join("out");

        MeasurementPivot::new()
            .with_batch_prefix("group_")
            .with_file_pattern("_daily", "txt")
            .pivot_file(&input, &output, None)?;

        assert!(output.join("group_001/ACME_daily.txt").exists());
        Ok(())
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let result = MeasurementPivot::new()
            .with_batch_size(0)
            .pivot_file(Path::new("unused.csv"), Path::new("unused"), None);
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
