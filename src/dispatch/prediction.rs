//! Stroke prediction panel.

use super::{AlertTrigger, DetachedAlert, ErrorFraming, Submission};
use crate::client::{FormError, PatientForm, PredictionRequest, PredictionResponse, StrokeBackend};
use crate::config::{AlertConfig, OrderingPolicy};
use crate::display::{to_fixed, DisplayRegion, RegionSnapshot, RenderOutcome, Tone};
use crate::logging::generate_request_id;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Instrument;

pub const RESULT_REGION_ID: &str = "predictionResult";
pub const ALERT_REGION_ID: &str = "alertMessage";

/// Shown in the alert region for elevated-risk predictions.
pub const CAREGIVER_ALERT_MESSAGE: &str =
    "High stroke risk detected! An alert has been sent to caregivers. Please consult a doctor immediately.";

const FRAMING: ErrorFraming = ErrorFraming {
    error_prefix: "Error: ",
    fallback: "Request failed.",
    network_prefix: "Network error: ",
    network_hint: ". Please ensure the backend server is running.",
};

/// `Prediction: {label} (Probability: {p*100:.2}%)`
pub fn format_prediction(response: &PredictionResponse) -> String {
    format!(
        "Prediction: {} (Probability: {}%)",
        response.prediction,
        to_fixed(response.probability * 100.0, 2)
    )
}

/// Map a prediction result to what the result region shows.
pub fn render_prediction(
    result: &Result<PredictionResponse, crate::client::ClientError>,
) -> RenderOutcome {
    match result {
        Ok(response) => RenderOutcome::Success {
            text: format_prediction(response),
            tone: if response.is_elevated_risk() {
                Tone::Danger
            } else {
                Tone::Success
            },
        },
        Err(e) => FRAMING.render(e),
    }
}

#[derive(Debug)]
pub struct PredictionSubmission {
    pub submission: Submission,
    /// Set when the outcome was an applied elevated-risk prediction and
    /// alerts are enabled
    pub alert: Option<DetachedAlert>,
}

impl PredictionSubmission {
    pub fn outcome(&self) -> &RenderOutcome {
        &self.submission.outcome
    }
}

/// Patient form submission panel: a result region plus a caregiver alert region.
pub struct PredictionPanel {
    backend: Arc<dyn StrokeBackend>,
    result: DisplayRegion,
    alert: DisplayRegion,
    alerts: AlertTrigger,
    /// Held across both resets so one submission owns the newest ticket of
    /// each region.
    resets: Mutex<()>,
}

impl PredictionPanel {
    pub fn new(
        backend: Arc<dyn StrokeBackend>,
        alerts: AlertConfig,
        ordering: OrderingPolicy,
    ) -> Self {
        Self {
            alerts: AlertTrigger::new(Arc::clone(&backend), alerts),
            backend,
            result: DisplayRegion::new(RESULT_REGION_ID, ordering),
            alert: DisplayRegion::new(ALERT_REGION_ID, ordering),
            resets: Mutex::new(()),
        }
    }

    pub fn result(&self) -> RegionSnapshot {
        self.result.snapshot()
    }

    pub fn alert(&self) -> RegionSnapshot {
        self.alert.snapshot()
    }

    /// Coerce a submitted form and run [`submit`](Self::submit).
    ///
    /// A missing field fails before either region is touched.
    pub async fn submit_form(&self, form: &PatientForm) -> Result<PredictionSubmission, FormError> {
        let request = PredictionRequest::from_form(form)?;
        Ok(self.submit(&request).await)
    }

    pub async fn submit(&self, request: &PredictionRequest) -> PredictionSubmission {
        let (result_ticket, alert_ticket) = {
            let _resets = self.resets.lock().unwrap_or_else(PoisonError::into_inner);
            (self.result.reset(), self.alert.reset())
        };

        let span = tracing::info_span!(
            "predict",
            request_id = %generate_request_id(),
            endpoint = crate::client::PREDICT_PATH,
        );

        async {
            let result = self.backend.predict(request).await;
            let outcome = render_prediction(&result);
            let applied = self.result.settle(result_ticket, &outcome);

            let elevated = matches!(&result, Ok(response) if response.is_elevated_risk());
            let mut alert = None;
            if applied && elevated {
                self.alert.settle(
                    alert_ticket,
                    &RenderOutcome::Success {
                        text: CAREGIVER_ALERT_MESSAGE.to_string(),
                        tone: Tone::Danger,
                    },
                );
                if let Ok(response) = &result {
                    tracing::info!(
                        probability = response.probability,
                        "Elevated stroke risk, notifying caregivers"
                    );
                    alert = self.alerts.fire(response.probability);
                }
            } else {
                self.alert.dismiss(alert_ticket);
            }

            match &outcome {
                RenderOutcome::Success { .. } => tracing::info!(applied, "Prediction rendered"),
                other => tracing::warn!(applied, outcome = %other.text(), "Prediction failed"),
            }

            PredictionSubmission {
                submission: Submission { outcome, applied },
                alert,
            }
        }
        .instrument(span)
        .await
    }
}
