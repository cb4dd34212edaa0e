use crate::adapters::source::parse_dataset;
use crate::core::{ConfigProvider, Dataset, Pipeline, Storage, TransformResult};
use crate::domain::exporter::{export, render_csv};
use crate::domain::model::ExportSummary;
use crate::utils::error::Result;
use std::path::Path;

/// Reads the station data file, builds the CSV, and writes it through `Storage`.
pub struct StationsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StationsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_location(&self) -> String {
        Path::new(self.config.output_dir())
            .join(self.config.output_file())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StationsPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let source = self.config.source_path();
        tracing::debug!("Reading station data from: {}", source);

        let raw = self.storage.read_file(source).await?;
        let dataset = parse_dataset(Path::new(source), &raw)?;

        let orphans = dataset.orphan_districts();
        if !orphans.is_empty() {
            tracing::warn!(
                "{} station lists belong to districts missing from the district list and will be skipped: {}",
                orphans.len(),
                orphans.join(", ")
            );
        }

        Ok(dataset)
    }

    async fn transform(&self, data: Dataset) -> Result<TransformResult> {
        let rows = export(&data.districts, &data.stations_by_district);
        let csv_output = render_csv(&rows)?;
        let summary = ExportSummary::new(&data, &rows, csv_output.len());

        Ok(TransformResult {
            rows,
            csv_output,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.output_location();

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.rows.len(),
            result.csv_output.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.csv_output.as_bytes())
            .await?;

        Ok(output_path)
    }
}
