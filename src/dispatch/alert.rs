//! Caregiver alert trigger.
//!
//! Fired from the prediction flow's elevated-risk branch. The alert runs as a
//! detached task: nothing in the UI waits for it and its failures are logged,
//! never rendered.

use crate::client::{AlertRequest, StrokeBackend};
use crate::config::AlertConfig;
use crate::display::to_fixed;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Format a probability as the alert's `risk_level` (two decimals).
pub fn risk_level(probability: f64) -> String {
    to_fixed(probability, 2)
}

#[derive(Clone)]
pub struct AlertTrigger {
    backend: Arc<dyn StrokeBackend>,
    config: AlertConfig,
}

impl AlertTrigger {
    pub fn new(backend: Arc<dyn StrokeBackend>, config: AlertConfig) -> Self {
        Self { backend, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Spawn the alert request. Returns `None` when alerts are disabled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fire(&self, probability: f64) -> Option<DetachedAlert> {
        if !self.config.enabled {
            tracing::debug!("Caregiver alerts disabled, not notifying");
            return None;
        }

        let alert = AlertRequest {
            patient_info: self.config.patient_info.clone(),
            risk_level: risk_level(probability),
        };
        let backend = Arc::clone(&self.backend);
        let span = tracing::info_span!("caregiver_alert", risk_level = %alert.risk_level);

        let handle = tokio::spawn(
            async move {
                match backend.send_alert(&alert).await {
                    Ok(()) => tracing::info!("Caregiver alert delivered"),
                    Err(e) => tracing::warn!(error = %e, "Caregiver alert failed"),
                }
            }
            .instrument(span),
        );

        Some(DetachedAlert { handle })
    }
}

/// Handle to an in-flight caregiver alert.
///
/// Dropping it leaves the alert running. [`join`](Self::join) exists for
/// callers that must not exit before the request is sent (a CLI process, a
/// test); it reports nothing about the alert's outcome.
#[derive(Debug)]
pub struct DetachedAlert {
    handle: JoinHandle<()>,
}

impl DetachedAlert {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the alert task to finish.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Caregiver alert task aborted");
        }
    }
}
