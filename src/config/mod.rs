pub mod toml_config;

use crate::adapters::SourceFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_file_name, validate_path, Validate,
};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_SOURCE_PATH: &str = "district_stations.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "GOOGLE_SHEETS_STATIONS_CSV.csv";

/// Command-line flags. Every flag is optional; unset flags fall back to the
/// TOML file given with `--config`, then to the built-in defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stations-csv")]
#[command(about = "Export district/station data to a District,Station CSV for spreadsheet import")]
pub struct CliConfig {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base directory for relative input and output paths
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Station data file (.json or .toml)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Directory for the CSV, relative to the data directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// CSV file name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Build the CSV and report, but do not write it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<ExportSettings> {
        let mut settings = match &self.config {
            Some(path) => ExportSettings::from_toml(&TomlConfig::from_file(path)?),
            None => ExportSettings::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(input) = &self.input {
            settings.source_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(output) = &self.output {
            settings.output_file = output.clone();
        }
        settings.dry_run |= self.dry_run;
        settings.verbose |= self.verbose;
        settings.json_logs |= self.json_logs;

        Ok(settings)
    }
}

/// Fully resolved settings for one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub data_dir: String,
    pub source_path: String,
    pub output_dir: String,
    pub output_file: String,
    pub dry_run: bool,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            source_path: DEFAULT_SOURCE_PATH.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            dry_run: false,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ExportSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: config.data_dir.clone().unwrap_or(defaults.data_dir),
            source_path: config.source.path.clone().unwrap_or(defaults.source_path),
            output_dir: config
                .output
                .directory
                .clone()
                .unwrap_or(defaults.output_dir),
            output_file: config
                .output
                .filename
                .clone()
                .unwrap_or(defaults.output_file),
            dry_run: false,
            verbose: config.verbose(),
            json_logs: config.json_logs(),
        }
    }
}

impl ConfigProvider for ExportSettings {
    fn source_path(&self) -> &str {
        &self.source_path
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for ExportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("source.path", &self.source_path)?;
        validate_file_extension("source.path", &self.source_path, &SourceFormat::EXTENSIONS)?;
        validate_path("output.directory", &self.output_dir)?;
        validate_file_name("output.filename", &self.output_file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ExportSettings::default();
        assert_eq!(settings.source_path, "district_stations.json");
        assert_eq!(settings.output_file, "GOOGLE_SHEETS_STATIONS_CSV.csv");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_keeps_defaults_for_unset_fields() {
        let config = TomlConfig::from_toml_str("[output]\nfilename = \"out.csv\"\n").unwrap();
        let settings = ExportSettings::from_toml(&config);

        assert_eq!(settings.output_file, "out.csv");
        assert_eq!(settings.source_path, DEFAULT_SOURCE_PATH);
        assert_eq!(settings.data_dir, DEFAULT_DATA_DIR);
    }

    #[test]
    fn test_validation_rejects_bad_source_extension() {
        let settings = ExportSettings {
            source_path: "generate_google_sheets_data.py".to_string(),
            ..ExportSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_without_arguments_uses_defaults() {
        let cli = CliConfig::parse_from(["stations-csv"]);
        assert_eq!(cli.resolve().unwrap(), ExportSettings::default());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_toml() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"data_dir = \"/data\"\n[source]\npath = \"from_toml.toml\"\n[logging]\nverbose = true\n",
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "stations-csv",
            "--config",
            config_path.as_str(),
            "--input",
            "from_cli.json",
            "--dry-run",
        ]);
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.data_dir, "/data");
        assert_eq!(settings.source_path, "from_cli.json");
        assert!(settings.dry_run);
        assert!(settings.verbose);
    }
}
