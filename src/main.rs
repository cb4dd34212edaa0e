use anyhow::Context;
use clap::Parser;
use stations_csv::utils::{logger, validation::Validate};
use stations_csv::{CliConfig, ExportEngine, ExportReport, LocalStorage, StationsPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let settings = cli
        .resolve()
        .with_context(|| format!("failed to load configuration {:?}", cli.config))?;

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting stations-csv");
    tracing::debug!("Settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(settings.data_dir.clone());
    let dry_run = settings.dry_run;
    let pipeline = StationsPipeline::new(storage, settings);
    let engine = ExportEngine::new(pipeline).with_dry_run(dry_run);

    match engine.run().await {
        Ok(report) => print_report(&report),
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_report(report: &ExportReport) {
    let summary = &report.summary;

    match &report.output_path {
        Some(path) => println!("✅ Created {}", path),
        None => println!("🔍 Dry run: nothing written"),
    }
    println!("   Total stations: {}", summary.rows);
    println!(
        "   Districts: {} exported of {} listed",
        summary.districts_exported, summary.districts_listed
    );
    if !summary.orphan_districts.is_empty() {
        println!(
            "   Skipped station lists: {}",
            summary.orphan_districts.join(", ")
        );
    }
    println!("   File size: {} bytes", summary.bytes);
    if let (Some(first), Some(last)) = (&summary.first_district, &summary.last_district) {
        println!("   First district: {}", first);
        println!("   Last district: {}", last);
    }
    println!(
        "   Generated at: {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
