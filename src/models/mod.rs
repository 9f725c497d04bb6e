pub mod coordinate;
pub mod measurement;
pub mod score;
pub mod station;

pub use coordinate::{Coordinate, ReferencePoint};
pub use measurement::{MeasurementPoint, MeasurementTable, StationSeries};
pub use score::{StationScore, StationScores};
pub use station::Station;
