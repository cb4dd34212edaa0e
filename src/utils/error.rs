use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to parse input source {}: {message}", path.display())]
    SourceParseError { path: PathBuf, message: String },

    #[error(
        "Could not replace {}: {source}. Complete output kept at {}",
        destination.display(),
        fallback.display()
    )]
    ReplaceFailed {
        destination: PathBuf,
        fallback: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run. Success is always 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            // output kept in the fallback file
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::SourceNotFound { .. } | ExportError::SourceParseError { .. } => {
                ErrorCategory::Input
            }
            ExportError::IoError(_) | ExportError::ReplaceFailed { .. } => ErrorCategory::Output,
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ExportError::CsvError(_) | ExportError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the computed output survives in the fallback file
            ExportError::ReplaceFailed { .. } => ErrorSeverity::Medium,
            ExportError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity().exit_code()
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExportError::SourceNotFound { path } => format!(
                "Create {} or point --input at an existing JSON/TOML station file",
                path.display()
            ),
            ExportError::SourceParseError { .. } => {
                "Check that the station file has a 'districts' list and a 'stations_by_district' table"
                    .to_string()
            }
            ExportError::ReplaceFailed {
                destination,
                fallback,
                ..
            } => format!(
                "Close {} in any editor or spreadsheet, then rename {} -> {}",
                destination.display(),
                fallback.display(),
                destination.display()
            ),
            ExportError::IoError(_) => {
                "Check permissions and free space for the output directory, then re-run".to_string()
            }
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. } => {
                "Fix the command-line flags or the TOML configuration file".to_string()
            }
            ExportError::CsvError(_) | ExportError::ProcessingError { .. } => {
                "Re-run with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::SourceNotFound { path } => {
                format!("Station data file not found: {}", path.display())
            }
            ExportError::ReplaceFailed { destination, .. } => format!(
                "The CSV was generated but {} could not be replaced",
                destination.display()
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_failed_is_distinguishable() {
        let err = ExportError::ReplaceFailed {
            destination: PathBuf::from("out.csv"),
            fallback: PathBuf::from("out_TEMP.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        };

        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("out_TEMP.csv"));
        assert!(err.recovery_suggestion().contains("out_TEMP.csv -> out.csv"));
    }

    #[test]
    fn test_missing_source_is_input_error() {
        let err = ExportError::SourceNotFound {
            path: PathBuf::from("district_stations.json"),
        };

        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err
            .user_friendly_message()
            .contains("district_stations.json"));
    }

    #[test]
    fn test_exit_codes_by_error_kind() {
        let missing = ExportError::SourceNotFound {
            path: PathBuf::from("district_stations.json"),
        };
        let kept_in_fallback = ExportError::ReplaceFailed {
            destination: PathBuf::from("out.csv"),
            fallback: PathBuf::from("out_TEMP.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        };
        let disk = ExportError::IoError(std::io::Error::other("disk full"));
        let bad_flag = ExportError::ConfigValidationError {
            field: "output_file".to_string(),
            message: "must not be empty".to_string(),
        };

        assert_eq!(missing.exit_code(), 1);
        assert_eq!(kept_in_fallback.exit_code(), 2);
        assert_eq!(disk.exit_code(), 3);
        assert_eq!(bad_flag.exit_code(), 1);
    }

    #[test]
    fn test_every_failure_exits_non_zero() {
        for severity in [
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ] {
            assert_ne!(severity.exit_code(), 0);
        }
    }
}
