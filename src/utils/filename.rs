use std::path::Path;

/// Extract the station id from a measurement filename
/// (e.g. `KS001_measurements.csv` -> `KS001`)
///
/// Returns `None` when the filename does not follow `<station_id><suffix>.<extension>`.
pub fn station_id_from_path(path: &Path, suffix: &str, extension: &str) -> Option<String> {
    let filename = path.file_name()?.to_str()?;
    let stem = filename.strip_suffix(extension)?.strip_suffix('.')?;
    let station_id = stem.strip_suffix(suffix)?;

    if station_id.is_empty() {
        None
    } else {
        Some(station_id.to_string())
    }
}

/// Whether a station id can be used as a filename component without leaving its
/// batch directory
pub fn is_safe_station_id(station_id: &str) -> bool {
    !station_id.is_empty()
        && station_id != "."
        && !station_id.contains("..")
        && !station_id.contains(&['/', '\\', '\0'][..])
}

/// Build the measurement filename for a station
pub fn measurement_file_name(station_id: &str, suffix: &str, extension: &str) -> String {
    format!("{}{}.{}", station_id, suffix, extension)
}

/// Build a 1-based batch directory name, zero-padded to three digits
pub fn batch_dir_name(prefix: &str, index: usize) -> String {
    format!("{}{:03}", prefix, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_station_id_from_path() {
        let path = PathBuf::from("data/batch_001/KS001_measurements.csv");
        assert_eq!(
            station_id_from_path(&path, "_measurements", "csv"),
            Some("KS001".to_string())
        );

        // Station ids can contain the separator
        let path = PathBuf::from("OK_ACME_measurements.csv");
        assert_eq!(
            station_id_from_path(&path, "_measurements", "csv"),
            Some("OK_ACME".to_string())
        );
    }

    #[test]
    fn test_station_id_rejects_other_files() {
        for name in [
            "notes.txt",
            "KS001.csv",
            "_measurements.csv",
            "KS001_measurements.txt",
            "KS001_measurementscsv",
        ] {
            let path = PathBuf::from(name);
            assert_eq!(station_id_from_path(&path, "_measurements", "csv"), None, "{}", name);
        }
    }

    #[test]
    fn test_names_round_trip() {
        let name = measurement_file_name("MESO42", "_measurements", "csv");
        assert_eq!(name, "MESO42_measurements.csv");
        assert_eq!(
            station_id_from_path(Path::new(&name), "_measurements", "csv"),
            Some("MESO42".to_string())
        );
    }

    #[test]
    fn test_is_safe_station_id() {
        for id in ["KS001", "OK_ACME", "st.42"] {
            assert!(is_safe_station_id(id), "{}", id);
        }
        for id in ["", ".", "..", "../../x", "a/b", "a\\b", "x..y"] {
            assert!(!is_safe_station_id(id), "{}", id);
        }
    }

    #[test]
    fn test_batch_dir_name() {
        assert_eq!(batch_dir_name("batch_", 1), "batch_001");
        assert_eq!(batch_dir_name("batch_", 42), "batch_042");
        assert_eq!(batch_dir_name("b", 1234), "b1234");
    }
}
