use crate::core::Pipeline;
use crate::domain::model::ExportReport;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// In dry-run mode the CSV is built and summarized but never written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<ExportReport> {
        tracing::info!("Starting station export");

        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} districts and {} station lists",
            dataset.districts.len(),
            dataset.stations_by_district.len()
        );

        let result = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "Built {} rows across {} districts",
            result.summary.rows,
            result.summary.districts_exported
        );

        let summary = result.summary.clone();
        if self.dry_run {
            tracing::info!("Dry run: skipping write of {} bytes", summary.bytes);
            return Ok(ExportReport {
                output_path: None,
                summary,
            });
        }

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(ExportReport {
            output_path: Some(output_path),
            summary,
        })
    }
}
