pub mod columns;
pub mod measurement_reader;
pub mod reference_reader;
pub mod station_reader;

pub use columns::{find_column, CoordinateColumns};
pub use measurement_reader::MeasurementReader;
pub use reference_reader::ReferenceReader;
pub use station_reader::StationReader;
