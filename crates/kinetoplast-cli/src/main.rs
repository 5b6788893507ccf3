//! Kinetoplast binary
//!
//! Runs dissolution trials configured through `KINETOPLAST_*` variables and
//! prints the averaged component sizes as JSON.

use kinetoplast_cli::{simulate, SimulationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kinetoplast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SimulationConfig::from_env()?;
    tracing::info!(
        "Running {} trial(s) on a {} lattice of {}x{}x{}",
        config.trials,
        config.topology,
        config.dims.x,
        config.dims.y,
        config.dims.z
    );

    let averaged = simulate(&config).await?;
    println!("{}", serde_json::to_string_pretty(&averaged)?);
    Ok(())
}
