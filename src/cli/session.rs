//! Shared startup for backend-facing commands

use crate::app::StrokeApp;
use crate::cli::ConnectionArgs;
use crate::config::StrokewatchConfig;
use anyhow::Context;

/// Load configuration with CLI overrides
///
/// A missing config file at the default path is not an error; defaults apply.
pub fn load_config(args: &ConnectionArgs) -> anyhow::Result<StrokewatchConfig> {
    let mut config = if args.config.exists() {
        StrokewatchConfig::load(Some(&args.config))
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        StrokewatchConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref base_url) = args.base_url {
        config.backend.base_url = base_url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration, initialize logging and build the components.
pub fn start(args: &ConnectionArgs) -> anyhow::Result<(StrokewatchConfig, StrokeApp)> {
    let config = load_config(args)?;

    if let Err(e) = crate::logging::init_tracing(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(config = %args.config.display(), "Configuration loaded");

    let app = StrokeApp::from_config(&config)?;
    Ok((config, app))
}
