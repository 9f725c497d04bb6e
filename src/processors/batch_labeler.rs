use crate::error::{ProcessingError, Result};
use crate::models::StationScores;
use crate::readers::MeasurementReader;
use crate::utils::constants::{
    DEFAULT_BATCH_PREFIX, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_SUFFIX, DEFAULT_LABEL_COLUMN,
};
use crate::utils::filename::station_id_from_path;
use crate::utils::progress::ProgressReporter;
use crate::writers::LabeledCsvWriter;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What happened to one measurement file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written { station_id: String, rows: usize },
    MissingScore { station_id: String },
    Failed { path: PathBuf, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub batch_name: String,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn files_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Written { .. }))
            .count()
    }

    pub fn files_missing_score(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::MissingScore { .. }))
            .count()
    }

    pub fn files_failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelingSummary {
    pub batches: Vec<BatchReport>,
}

impl LabelingSummary {
    pub fn files_written(&self) -> usize {
        self.batches.iter().map(BatchReport::files_written).sum()
    }

    pub fn files_missing_score(&self) -> usize {
        self.batches.iter().map(BatchReport::files_missing_score).sum()
    }

    pub fn files_failed(&self) -> usize {
        self.batches.iter().map(BatchReport::files_failed).sum()
    }

    pub fn files_skipped(&self) -> usize {
        self.files_missing_score() + self.files_failed()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Labeling Summary:\n");
        summary.push_str(&format!("  Batches: {}\n", self.batches.len()));
        summary.push_str(&format!("  Files written: {}\n", self.files_written()));
        summary.push_str(&format!("  Files skipped: {}\n", self.files_skipped()));
        summary.push_str(&format!(
            "    - no station score: {}\n",
            self.files_missing_score()
        ));
        summary.push_str(&format!("    - read/write errors: {}\n", self.files_failed()));

        for report in &self.batches {
            summary.push_str(&format!(
                "  {}: {} written, {} skipped\n",
                report.batch_name,
                report.files_written(),
                report.files_missing_score() + report.files_failed()
            ));
        }

        summary
    }
}

/// Appends each station's score to its measurement files, batch by batch.
///
/// Per-file problems (no score, unreadable input, failed write) are recorded in
/// the report and never stop the batch.
pub struct BatchLabeler {
    writer: LabeledCsvWriter,
    batch_prefix: String,
    file_suffix: String,
    file_extension: String,
    max_workers: usize,
}

impl BatchLabeler {
    pub fn new(label_column: &str) -> Self {
        Self {
            writer: LabeledCsvWriter::new(label_column),
            batch_prefix: DEFAULT_BATCH_PREFIX.to_string(),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            max_workers: 1,
        }
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

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Batch directories directly under `root`, sorted by name
    pub fn discover_batches(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut batches = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            let matches_prefix = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&self.batch_prefix));

            if path.is_dir() && matches_prefix {
                batches.push(path);
            }
        }
        batches.sort();
        Ok(batches)
    }

    /// Measurement files in a batch with the station id taken from each filename, sorted
    pub fn discover_files(&self, batch: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(batch)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(station_id) =
                station_id_from_path(&path, &self.file_suffix, &self.file_extension)
            {
                files.push((station_id, path));
            }
        }
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    /// Label every measurement file in `batch_input`, writing to `batch_output`
    pub fn label_batch(
        &self,
        batch_input: &Path,
        scores: &StationScores,
        batch_output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchReport> {
        let pool = self.build_pool()?;
        self.label_batch_in(&pool, batch_input, scores, batch_output, progress)
    }

    fn build_pool(&self) -> Result<ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))
    }

    fn label_batch_in(
        &self,
        pool: &ThreadPool,
        batch_input: &Path,
        scores: &StationScores,
        batch_output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchReport> {
        let batch_name = batch_input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let files = self.discover_files(batch_input)?;
        fs::create_dir_all(batch_output)?;
        debug!("{}: {} measurement files", batch_name, files.len());

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|(station_id, path)| {
                    let outcome = self.label_file(station_id, path, scores, batch_output);
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    outcome
                })
                .collect()
        });

        let report = BatchReport {
            batch_name,
            outcomes,
        };
        info!(
            "{}: {} files written, {} skipped",
            report.batch_name,
            report.files_written(),
            report.files_missing_score() + report.files_failed()
        );
        Ok(report)
    }

    /// Label every batch under `input_root` into a mirrored tree under `output_root`
    pub fn label_all(
        &self,
        input_root: &Path,
        scores: &StationScores,
        output_root: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<LabelingSummary> {
        let batches = self.discover_batches(input_root)?;
        if batches.is_empty() {
            warn!(
                "No '{}*' batch directories found under {}",
                self.batch_prefix,
                input_root.display()
            );
        }
        fs::create_dir_all(output_root)?;

        if let Some(p) = progress {
            let mut total = 0usize;
            for batch in &batches {
                total += self.discover_files(batch)?.len();
            }
            p.set_length(total as u64);
        }

        let pool = self.build_pool()?;
        let mut summary = LabelingSummary::default();
        for batch in &batches {
            let name = batch.file_name().unwrap_or_default();
            if let Some(p) = progress {
                p.set_message(&format!("Processing {}...", name.to_string_lossy()));
            }
            let report =
                self.label_batch_in(&pool, batch, scores, &output_root.join(name), progress)?;
            summary.batches.push(report);
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Labeled {} files across {} batches",
                summary.files_written(),
                summary.batches.len()
            ));
        }
        Ok(summary)
    }

    fn label_file(
        &self,
        station_id: &str,
        input: &Path,
        scores: &StationScores,
        output_dir: &Path,
    ) -> FileOutcome {
        let Some(file_name) = input.file_name() else {
            return FileOutcome::Failed {
                path: input.to_path_buf(),
                error: "path has no file name".to_string(),
            };
        };
        let output = output_dir.join(file_name);

        let Some(score) = scores.score_for(station_id) else {
            warn!("No score found for station {}, skipping", station_id);
            remove_stale_output(&output);
            return FileOutcome::MissingScore {
                station_id: station_id.to_string(),
            };
        };

        let result = MeasurementReader::new()
            .read_table(input)
            .and_then(|table| {
                self.writer.write(&table, score, &output)?;
                Ok(table.row_count())
            });

        match result {
            Ok(rows) => FileOutcome::Written {
                station_id: station_id.to_string(),
                rows,
            },
            Err(e) => {
                error!("Error processing {}: {}", input.display(), e);
                remove_stale_output(&output);
                FileOutcome::Failed {
                    path: input.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }
}

/// A skipped file must not leave an earlier run's output behind
fn remove_stale_output(output: &Path) {
    if output.is_file() {
        if let Err(e) = fs::remove_file(output) {
            warn!("Could not remove stale output {}: {}", output.display(), e);
        }
    }
}

impl Default for BatchLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_COLUMN)
    }
}
