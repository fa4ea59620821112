//! Startup wiring: build every component once from configuration.

use crate::client::{ClientError, HttpBackend, StrokeBackend};
use crate::config::StrokewatchConfig;
use crate::dispatch::{ChatWidget, PlannerBoard, PredictionPanel};
use std::sync::Arc;

/// The three interaction components, sharing one backend handle.
pub struct StrokeApp {
    pub prediction: PredictionPanel,
    pub chat: ChatWidget,
    pub planner: PlannerBoard,
}

impl StrokeApp {
    /// Build the components against the configured HTTP backend.
    pub fn from_config(config: &StrokewatchConfig) -> Result<Self, ClientError> {
        let backend = HttpBackend::new(&config.backend)?;
        tracing::debug!(base_url = %backend.base_url(), "Using HTTP backend");
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Build the components against any backend implementation.
    pub fn with_backend(backend: Arc<dyn StrokeBackend>, config: &StrokewatchConfig) -> Self {
        let ordering = config.dispatch.ordering;
        let content_logging = config.logging.enable_content_logging;
        Self {
            prediction: PredictionPanel::new(
                Arc::clone(&backend),
                config.alerts.clone(),
                ordering,
            ),
            chat: ChatWidget::new(Arc::clone(&backend)).with_content_logging(content_logging),
            planner: PlannerBoard::new(backend, ordering).with_content_logging(content_logging),
        }
    }
}
