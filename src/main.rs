use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use bilesu_report::apis::BilesuParadizeApi;
use bilesu_report::common::types::EventSource;
use bilesu_report::config::Config;
use bilesu_report::infra::ReqwestHttp;
use bilesu_report::observability::init_logging;
use bilesu_report::pipeline::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load().context("loading configuration")?;
    init_logging(&config.report.log_dir);

    let http = Arc::new(ReqwestHttp::new(config.timeout()).context("building HTTP client")?);
    let source = BilesuParadizeApi::from_config(http, &config);
    info!(url = source.url(), "fetching repertoire");

    let result = match Pipeline::run(&source, &config).await {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(e).context(format!("generating report from {}", source.source_name()));
        }
    };

    println!("\n📊 Report for venue {}:", config.api.venue_id);
    println!("   Total events: {}", result.total_events);
    for (tier, count) in &result.tier_counts {
        println!("   {:<7} {}", tier.label(), count);
    }
    for path in &result.output_files {
        println!("   Saved: {}", path.display());
    }
    Ok(())
}
