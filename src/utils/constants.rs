/// Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Scoring defaults
pub const DEFAULT_K: usize = 5;
pub const DEFAULT_LABEL_COLUMN: &str = "TurbineScore";

/// Measurement tree layout
pub const DEFAULT_BATCH_PREFIX: &str = "batch_";
pub const DEFAULT_FILE_SUFFIX: &str = "_measurements";
pub const DEFAULT_FILE_EXTENSION: &str = "csv";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const TIME_COLUMN: &str = "time";

/// Accepted header names (matched case-insensitively)
pub const LATITUDE_COLUMNS: &[&str] = &["latitude", "lat"];
pub const LONGITUDE_COLUMNS: &[&str] = &["longitude", "lon", "lng", "long"];
pub const STATION_ID_COLUMNS: &[&str] = &["id", "station", "station_id"];

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PROXLABEL";

/// Stations between progress log lines during scoring
pub const SCORING_LOG_INTERVAL: usize = 20;
