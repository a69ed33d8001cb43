use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use analysis_client::AnalysisClient;
use marketmap_common::{Category, Config};
use marketmap_engine::{AcquisitionPolicy, Orchestrator};
use marketmap_view::{build_layer, render_pins, CollisionResolver, VisibilityToggles};

#[derive(Parser, Debug)]
#[command(
    name = "marketmap",
    about = "Acquire the four market-intelligence layers for a startup idea"
)]
struct Args {
    /// The startup idea to analyze
    idea: String,

    /// Who the product is for
    #[arg(long, default_value = "early adopters of the product")]
    audience: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("marketmap=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    info!("MarketMap acquisition starting...");

    let client = AnalysisClient::new(
        &config.analysis_base_url,
        Duration::from_secs(config.request_timeout_secs),
    );
    let (orchestrator, mut notifications) = Orchestrator::new(client, AcquisitionPolicy::default());

    tokio::spawn(async move {
        while let Some(alert) = notifications.recv().await {
            tracing::warn!(
                category = %alert.category,
                message = %alert.message,
                "Feed unavailable"
            );
        }
    });

    orchestrator.run(&args.idea, &args.audience).await?;

    let snapshot = orchestrator.snapshot();
    for category in Category::all() {
        let state = snapshot.category(category);
        info!(
            category = %category,
            status = ?state.status,
            records = state.records.len(),
            "Acquisition result"
        );
    }

    let records = snapshot.all_records();
    let pins = render_pins(
        &records,
        &VisibilityToggles::default(),
        &CollisionResolver::default(),
        &mut rand::rng(),
    );
    let density = build_layer(&snapshot.demographic_points());
    info!(
        pins = pins.len(),
        density_points = density.points.len(),
        analysis = snapshot.analysis.is_some(),
        "Render inputs ready"
    );

    Ok(())
}
