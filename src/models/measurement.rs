use crate::utils::format::format_value;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One observation in long format, as produced by the extraction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub station: String,
    pub time: String,
    pub measurement: String,
    pub value: Option<f64>,
}

/// Contents of a per-station measurement file, kept as text so rows are
/// written back exactly as read
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl MeasurementTable {
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Time series of a single station keyed by time, then measurement name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSeries {
    pub station_id: String,
    values: BTreeMap<String, HashMap<String, Option<f64>>>,
}

impl StationSeries {
    pub fn new(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Record a value; a later point for the same time and measurement replaces an earlier one
    pub fn insert(&mut self, time: &str, measurement: &str, value: Option<f64>) {
        self.values
            .entry(time.to_string())
            .or_default()
            .insert(measurement.to_string(), value);
    }

    pub fn value(&self, time: &str, measurement: &str) -> Option<f64> {
        self.values
            .get(time)
            .and_then(|m| m.get(measurement))
            .copied()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows in time order, one cell per measurement in `columns`.
    /// Missing values become empty cells.
    pub fn rows<'a>(
        &'a self,
        columns: &'a [String],
    ) -> impl Iterator<Item = Vec<String>> + 'a {
        self.values.iter().map(move |(time, by_measurement)| {
            let mut row = Vec::with_capacity(columns.len() + 1);
            row.push(time.clone());
            for column in columns {
                row.push(match by_measurement.get(column).copied().flatten() {
                    Some(value) => format_value(value),
                    None => String::new(),
                });
            }
            row
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rows_follow_declared_columns() {
        let mut series = StationSeries::new("KS001");
        series.insert("2024-01-02T00:00:00Z", "temp", Some(3.5));
        series.insert("2024-01-01T00:00:00Z", "wind", Some(7.0));
        series.insert("2024-01-01T00:00:00Z", "temp", None);

        let columns = vec!["temp".to_string(), "wind".to_string()];
        let rows: Vec<Vec<String>> = series.rows(&columns).collect();

        assert_eq!(
            rows,
            vec![
                vec!["2024-01-01T00:00:00Z".to_string(), String::new(), "7.0".to_string()],
                vec!["2024-01-02T00:00:00Z".to_string(), "3.5".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_series_last_point_wins() {
        let mut series = StationSeries::new("KS001");
        series.insert("t1", "temp", Some(1.0));
        series.insert("t1", "temp", Some(2.0));

        assert_eq!(series.len(), 1);
        assert_eq!(series.value("t1", "temp"), Some(2.0));
        assert_eq!(series.value("t1", "wind"), None);
    }

    #[test]
    fn test_table_has_column() {
        let table = MeasurementTable::new(
            StringRecord::from(vec!["time", "temp"]),
            vec![StringRecord::from(vec!["t1", "1.0"])],
        );
        assert!(table.has_column("temp"));
        assert!(!table.has_column("TurbineScore"));
        assert_eq!(table.row_count(), 1);
    }
}
