//! Structured logging setup and helpers
//!
//! Logs go to stderr through `tracing-subscriber`; stdout is reserved for
//! rendered results so the CLI can be piped.

pub mod fields;

pub use fields::truncate_content;

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Build filter directives string from LoggingConfig
///
/// Produces the base level followed by one `strokewatch::{component}={level}`
/// directive per configured component.
///
/// # Examples
///
/// ```
/// use strokewatch::config::{LogFormat, LoggingConfig};
/// use strokewatch::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("client".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,strokewatch::client=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",strokewatch::{}={}", component, level));
        }
    }

    filter_str
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!(
            "WARNING: Content logging is enabled. Chat messages and planner input will be logged."
        );
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Generate a unique request ID for correlating one dispatch's log lines.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
