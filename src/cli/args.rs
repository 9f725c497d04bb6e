use crate::utils::constants::{
    DEFAULT_BATCH_PREFIX, DEFAULT_BATCH_SIZE, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_SUFFIX,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "proximity-labeler")]
#[command(about = "Label station measurement files with a proximity score to reference points")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,
}

/// Options shared by every command that scores stations
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    #[arg(long, help = "Configuration file (TOML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Reference point (e.g. turbine) CSV file")]
    pub reference_file: Option<PathBuf>,

    #[arg(short, long, help = "Station metadata CSV file")]
    pub station_file: Option<PathBuf>,

    #[arg(short, help = "Number of nearest reference points to average [default: 5]")]
    pub k: Option<usize>,

    #[arg(long, help = "Worker threads [default: number of CPUs]")]
    pub max_workers: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every station and label its measurement files
    Label {
        #[command(flatten)]
        scoring: ScoringArgs,

        #[arg(short, long, help = "Directory containing the batch_* folders")]
        measurement_root: Option<PathBuf>,

        #[arg(short, long, help = "Directory for the labeled copy of the batch folders")]
        output_root: Option<PathBuf>,

        #[arg(long, help = "Name of the appended score column [default: TurbineScore]")]
        label_column: Option<String>,

        #[arg(long, help = "Also write the station scores (.csv or .json)")]
        scores_file: Option<PathBuf>,
    },

    /// Compute station scores without labeling any files
    Score {
        #[command(flatten)]
        scoring: ScoringArgs,

        #[arg(short, long, help = "Output file (.csv or .json)")]
        output: PathBuf,
    },

    /// Split a long-format measurement export into per-station files in batch folders
    Pivot {
        #[arg(short, long, help = "CSV with station,time,measurement,value columns")]
        input: PathBuf,

        #[arg(short, long, help = "Directory to create the batch folders in")]
        output_root: PathBuf,

        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        #[arg(long, default_value = DEFAULT_BATCH_PREFIX)]
        batch_prefix: String,

        #[arg(long, default_value = DEFAULT_FILE_SUFFIX, help = "Appended to the station id in file names")]
        file_suffix: String,

        #[arg(long, default_value = DEFAULT_FILE_EXTENSION)]
        file_extension: String,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Measurement columns in output order (e.g. 'temp,rh'); default: order of appearance"
        )]
        measurements: Vec<String>,
    },
}
