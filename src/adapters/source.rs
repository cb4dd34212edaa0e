//! Station data files.
//!
//! A data file is JSON or TOML holding a `districts` list and a
//! `stations_by_district` table. Scalar station values that are not strings
//! are kept and stringified.

use crate::domain::model::{Dataset, StationsByDistrict};
use crate::utils::error::{ExportError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "toml"];

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(SourceFormat::Json),
            Some("toml") => Ok(SourceFormat::Toml),
            other => Err(ExportError::InvalidConfigValueError {
                field: "source.path".to_string(),
                value: path.display().to_string(),
                reason: format!(
                    "Unsupported data file type {:?}. Allowed extensions: {}",
                    other.unwrap_or(""),
                    Self::EXTENSIONS.join(", ")
                ),
            }),
        }
    }
}

/// A station value as written in the data file. Scalars keep the text they
/// were written with, so `1.0` stays `1.0` and large integers stay exact.
trait StationValue {
    fn into_station(self) -> std::result::Result<String, String>;
}

impl StationValue for serde_json::Value {
    fn into_station(self) -> std::result::Result<String, String> {
        match self {
            serde_json::Value::String(text) => Ok(text),
            serde_json::Value::Number(number) => Ok(number.to_string()),
            serde_json::Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(format!("station value {} is not a scalar", other)),
        }
    }
}

impl StationValue for toml::Value {
    fn into_station(self) -> std::result::Result<String, String> {
        match self {
            toml::Value::String(text) => Ok(text),
            toml::Value::Integer(value) => Ok(value.to_string()),
            // `{:?}` keeps the fractional part of whole floats
            toml::Value::Float(value) => Ok(format!("{:?}", value)),
            toml::Value::Boolean(flag) => Ok(flag.to_string()),
            toml::Value::Datetime(datetime) => Ok(datetime.to_string()),
            other => Err(format!("station value {} is not a scalar", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDataset<V> {
    #[serde(default)]
    districts: Vec<String>,
    #[serde(default = "HashMap::new")]
    stations_by_district: HashMap<String, Vec<V>>,
}

impl<V: StationValue> RawDataset<V> {
    fn into_dataset(self) -> std::result::Result<Dataset, String> {
        let mut stations_by_district =
            StationsByDistrict::with_capacity(self.stations_by_district.len());
        for (district, stations) in self.stations_by_district {
            let stations = stations
                .into_iter()
                .map(StationValue::into_station)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|message| format!("district {:?}: {}", district, message))?;
            stations_by_district.insert(district, stations);
        }

        Ok(Dataset {
            districts: self.districts,
            stations_by_district,
        })
    }
}

/// Parses raw file contents. `path` is only used for format detection and
/// error messages.
pub fn parse_dataset(path: &Path, data: &[u8]) -> Result<Dataset> {
    let format = SourceFormat::from_path(path)?;
    let parse_error = |message: String| ExportError::SourceParseError {
        path: path.to_path_buf(),
        message,
    };

    let dataset = match format {
        SourceFormat::Json => {
            let raw: RawDataset<serde_json::Value> =
                serde_json::from_slice(data).map_err(|e| parse_error(e.to_string()))?;
            raw.into_dataset().map_err(parse_error)?
        }
        SourceFormat::Toml => {
            let text = std::str::from_utf8(data)
                .map_err(|e| parse_error(format!("file is not valid UTF-8: {}", e)))?;
            let raw: RawDataset<toml::Value> =
                toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            raw.into_dataset().map_err(parse_error)?
        }
    };

    tracing::debug!(
        "Parsed {:?} data file {}: {} districts, {} station lists",
        format,
        path.display(),
        dataset.districts.len(),
        dataset.stations_by_district.len()
    );
    Ok(dataset)
}
