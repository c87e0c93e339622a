//! House Pricer - Main Entry Point

use anyhow::Context;
use pricing_api::{build_state, init_logging, run_server, Settings};
use tracing::{error, info};

/// Overrides the config file location
const CONFIG_PATH_VAR: &str = "HOUSE_PRICER_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_PATH_VAR).ok();
    let settings = Settings::load(config_path.as_deref()).context("loading configuration")?;
    init_logging(&settings.logging)?;

    info!("=== House Pricer v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Reference year {}", settings.reference_year());

    let state = match build_state(&settings) {
        Ok(state) => state,
        Err(e) => {
            error!("Cannot start without a usable model: {}", e);
            eprintln!("error: {}", e);
            return Err(e.into());
        }
    };

    run_server(state, &settings).await?;

    Ok(())
}
