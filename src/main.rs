use anyhow::{anyhow, Context, Result};
use ipasay::ClientConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ipasay=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional first argument: path to a TOML config file
    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    config.validate().context("Invalid configuration")?;

    info!("Starting ipasay against {}", config.server_url);

    ipasay::ui::run(config).map_err(|e| anyhow!("GUI error: {}", e))
}
