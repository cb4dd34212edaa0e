use crate::utils::error::{ExportError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<String>,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
data_dir = "/srv/stations"

[source]
path = "district_stations.toml"

[output]
directory = "exports"
filename = "stations.csv"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir.as_deref(), Some("/srv/stations"));
        assert_eq!(config.source.path.as_deref(), Some("district_stations.toml"));
        assert_eq!(config.output.directory.as_deref(), Some("exports"));
        assert_eq!(config.output.filename.as_deref(), Some("stations.csv"));
        assert!(config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.source.path.is_none());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STATIONS_CSV_TEST_DIR", "/tmp/stations");

        let toml_content = r#"
data_dir = "${STATIONS_CSV_TEST_DIR}"

[output]
filename = "${STATIONS_CSV_UNSET_VAR}.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/stations"));
        assert_eq!(
            config.output.filename.as_deref(),
            Some("${STATIONS_CSV_UNSET_VAR}.csv")
        );

        std::env::remove_var("STATIONS_CSV_TEST_DIR");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = TomlConfig::from_toml_str("[source\npath = 1");
        assert!(matches!(
            result,
            Err(ExportError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\npath = \"stations.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.path.as_deref(), Some("stations.json"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = TomlConfig::from_file("/definitely/not/here/stations-csv.toml");
        assert!(matches!(result, Err(ExportError::ConfigError { .. })));
    }
}
