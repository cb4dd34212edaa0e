pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::ExportSettings;
pub use core::{etl::ExportEngine, pipeline::StationsPipeline};
pub use domain::exporter::{export, render_csv};
pub use domain::model::{Dataset, ExportReport, ExportSummary, StationRow, StationsByDistrict};
pub use utils::error::{ExportError, Result};
