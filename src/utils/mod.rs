pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod format;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{dms_to_decimal, haversine_distance, parse_coordinate};
pub use filename::{
    batch_dir_name, is_safe_station_id, measurement_file_name, station_id_from_path,
};
pub use format::format_value;
pub use logging::init_logging;
pub use progress::ProgressReporter;
