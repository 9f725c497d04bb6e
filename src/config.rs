use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_BATCH_PREFIX, DEFAULT_FILE_EXTENSION, DEFAULT_FILE_SUFFIX, DEFAULT_K,
    DEFAULT_LABEL_COLUMN, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Run configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional TOML/JSON
/// file, `PROXLABEL_*` environment variables, command-line overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LabelerConfig {
    #[serde(default)]
    pub reference_file: Option<PathBuf>,

    #[serde(default)]
    pub station_file: Option<PathBuf>,

    #[serde(default)]
    pub measurement_root: Option<PathBuf>,

    #[serde(default)]
    pub output_root: Option<PathBuf>,

    #[validate(range(min = 1))]
    pub k: usize,

    #[validate(length(min = 1))]
    pub label_column: String,

    pub batch_prefix: String,

    #[validate(length(min = 1))]
    pub file_suffix: String,

    #[validate(length(min = 1))]
    pub file_extension: String,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

/// Values supplied on the command line; `None` leaves lower layers untouched
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub reference_file: Option<PathBuf>,
    pub station_file: Option<PathBuf>,
    pub measurement_root: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub k: Option<usize>,
    pub label_column: Option<String>,
    pub max_workers: Option<usize>,
}

impl LabelerConfig {
    pub fn load(config_file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let path_value = |p: PathBuf| p.to_string_lossy().into_owned();

        let mut builder = Config::builder()
            .set_default("k", DEFAULT_K as i64)?
            .set_default("label_column", DEFAULT_LABEL_COLUMN)?
            .set_default("batch_prefix", DEFAULT_BATCH_PREFIX)?
            .set_default("file_suffix", DEFAULT_FILE_SUFFIX)?
            .set_default("file_extension", DEFAULT_FILE_EXTENSION)?
            .set_default("max_workers", num_cpus::get() as i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("reference_file", overrides.reference_file.map(path_value))?
            .set_override_option("station_file", overrides.station_file.map(path_value))?
            .set_override_option(
                "measurement_root",
                overrides.measurement_root.map(path_value),
            )?
            .set_override_option("output_root", overrides.output_root.map(path_value))?
            .set_override_option("k", overrides.k.map(|k| k as i64))?
            .set_override_option("label_column", overrides.label_column)?
            .set_override_option("max_workers", overrides.max_workers.map(|n| n as i64))?
            .build()?;

        let config: LabelerConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn reference_file(&self) -> Result<&Path> {
        required(&self.reference_file, "reference_file")
    }

    pub fn station_file(&self) -> Result<&Path> {
        required(&self.station_file, "station_file")
    }

    pub fn measurement_root(&self) -> Result<&Path> {
        required(&self.measurement_root, "measurement_root")
    }

    pub fn output_root(&self) -> Result<&Path> {
        required(&self.output_root, "output_root")
    }
}

fn required<'a>(value: &'a Option<PathBuf>, key: &str) -> Result<&'a Path> {
    value.as_deref().ok_or_else(|| {
        ProcessingError::Config(format!(
            "'{}' is not set (use the command-line flag, the config file or {}_{})",
            key,
            ENV_PREFIX,
            key.to_uppercase()
        ))
    })
}
