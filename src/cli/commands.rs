use crate::cli::args::{Cli, Commands, ScoringArgs};
use crate::config::{ConfigOverrides, LabelerConfig};
use crate::error::Result;
use crate::models::StationScores;
use crate::processors::{BatchLabeler, MeasurementPivot, StationScorer};
use crate::readers::{ReferenceReader, StationReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::ScoreWriter;
use std::path::PathBuf;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Label {
            scoring,
            measurement_root,
            output_root,
            label_column,
            scores_file,
        } => {
            let config = load_config(
                &scoring,
                ConfigOverrides {
                    measurement_root,
                    output_root,
                    label_column,
                    ..Default::default()
                },
            )?;
            let measurement_root = config.measurement_root()?.to_path_buf();
            let output_root = config.output_root()?.to_path_buf();

            let scores = score_stations(&config, quiet).await?;
            if let Some(path) = scores_file {
                ScoreWriter::new().write(&scores, &path)?;
            }

            println!("Processing measurement files...");
            println!("Input directory: {}", measurement_root.display());

            let labeler = BatchLabeler::new(&config.label_column)
                .with_batch_prefix(&config.batch_prefix)
                .with_file_pattern(&config.file_suffix, &config.file_extension)
                .with_max_workers(config.max_workers);

            let output = output_root.clone();
            let summary = tokio::task::spawn_blocking(move || {
                let progress = ProgressReporter::new(0, "Labeling measurement files...", quiet);
                labeler.label_all(&measurement_root, &scores, &output, Some(&progress))
            })
            .await??;

            println!("\n{}", summary.summary());
            println!("Output saved to: {}", output_root.display());
        }

        Commands::Score { scoring, output } => {
            let config = load_config(&scoring, ConfigOverrides::default())?;
            let scores = score_stations(&config, quiet).await?;

            ScoreWriter::new().write(&scores, &output)?;
            println!(
                "Scored {} stations (max closest-{} average distance {:.2} km)",
                scores.len(),
                scores.k,
                scores.max_distance_km
            );
            println!("Output saved to: {}", output.display());
        }

        Commands::Pivot {
            input,
            output_root,
            batch_size,
            batch_prefix,
            file_suffix,
            file_extension,
            measurements,
        } => {
            println!("Pivoting measurement points from {}", input.display());

            let mut pivot = MeasurementPivot::new()
                .with_batch_size(batch_size)
                .with_batch_prefix(&batch_prefix)
                .with_file_pattern(&file_suffix, &file_extension);
            if !measurements.is_empty() {
                pivot = pivot.with_measurements(measurements);
            }

            let output = output_root.clone();
            let report = tokio::task::spawn_blocking(move || {
                let progress = ProgressReporter::new(0, "Writing station files...", quiet);
                pivot.pivot_file(&input, &output, Some(&progress))
            })
            .await??;

            println!(
                "Wrote {} stations ({} rows) into {} batches under {}",
                report.stations,
                report.rows_written,
                report.batches,
                output_root.display()
            );
            if report.stations_rejected > 0 {
                println!(
                    "Skipped {} stations whose ids cannot be used as file names",
                    report.stations_rejected
                );
            }
            if report.points_ignored > 0 {
                println!(
                    "Ignored {} points for undeclared measurements",
                    report.points_ignored
                );
            }
        }
    }

    Ok(())
}

fn load_config(scoring: &ScoringArgs, overrides: ConfigOverrides) -> Result<LabelerConfig> {
    LabelerConfig::load(
        scoring.config.as_deref(),
        ConfigOverrides {
            reference_file: scoring.reference_file.clone(),
            station_file: scoring.station_file.clone(),
            k: scoring.k,
            max_workers: scoring.max_workers,
            ..overrides
        },
    )
}

/// Load both coordinate sets and compute the score lookup; the lookup is complete
/// before any file is labeled
async fn score_stations(config: &LabelerConfig, quiet: bool) -> Result<StationScores> {
    let reference_file: PathBuf = config.reference_file()?.to_path_buf();
    let station_file: PathBuf = config.station_file()?.to_path_buf();
    let scorer = StationScorer::new(config.k).with_max_workers(config.max_workers);

    println!("Loading reference points and stations...");
    let scores = tokio::task::spawn_blocking(move || {
        let references = ReferenceReader::new().read_references(&reference_file)?;
        let stations = StationReader::new().read_stations(&station_file)?;

        let progress = ProgressReporter::new(stations.len() as u64, "Scoring stations...", quiet);
        scorer.score(&stations, &references, Some(&progress))
    })
    .await??;

    info!(
        "Scored {} stations, max closest-{} average distance {:.2} km",
        scores.len(),
        scores.k,
        scores.max_distance_km
    );
    Ok(scores)
}
