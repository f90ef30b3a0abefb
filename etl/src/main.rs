use anyhow::{Context, Result};
use chrono::Local;
use etl::config::{init_logger, load_environment};
use etl::services::YouTubeClient;
use etl::{run_pipeline, Config};
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    load_environment();
    init_logger();

    if let Err(e) = run().await {
        error!("ETL run failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Query: {:?}, max results: {}, output: {}",
        config.query, config.max_results, config.output_path
    );

    let client = YouTubeClient::from_config(&config);
    let extracted_date = Local::now().date_naive();

    let report = run_pipeline(&client, &config, extracted_date).await?;
    info!("ETL run completed, {} rows written to {}", report.rows, report.path);

    Ok(())
}
