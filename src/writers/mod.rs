pub mod labeled_writer;
pub mod score_writer;
pub mod series_writer;

pub use labeled_writer::LabeledCsvWriter;
pub use score_writer::ScoreWriter;
pub use series_writer::SeriesWriter;
