pub mod batch_labeler;
pub mod measurement_pivot;
pub mod nearest_k;
pub mod normalizer;
pub mod station_scorer;

pub use batch_labeler::{BatchLabeler, BatchReport, FileOutcome, LabelingSummary};
pub use measurement_pivot::{MeasurementPivot, PivotReport, PivotedSeries};
pub use nearest_k::closest_k_average;
pub use normalizer::normalize;
pub use station_scorer::{DistanceSummary, StationScorer};
