//! Interaction components.
//!
//! Each component is built once, owns its display surface and a handle to the
//! backend, and runs the same cycle for every user action:
//!
//! 1. reset its region,
//! 2. send the typed request,
//! 3. turn the result into exactly one [`RenderOutcome`],
//! 4. settle the region with it.
//!
//! | Component | Endpoint | Surface |
//! |---|---|---|
//! | [`PredictionPanel`] | `/predict_stroke` (+ `/alert_system`) | `predictionResult`, `alertMessage` |
//! | [`ChatWidget`] | `/chatbot` | [`ChatTranscript`](crate::display::ChatTranscript) |
//! | [`PlannerBoard`] | `/planner/{kind}` | `{kind}PlannerResult` |

pub mod alert;
pub mod chat;
pub mod planner;
pub mod prediction;

pub use alert::{AlertTrigger, DetachedAlert};
pub use chat::{ChatExchange, ChatWidget};
pub use planner::PlannerBoard;
pub use prediction::{
    format_prediction, render_prediction, PredictionPanel, PredictionSubmission,
    CAREGIVER_ALERT_MESSAGE,
};

use crate::client::{ClientError, ErrorKind};
use crate::display::RenderOutcome;

/// Result of one submission against a display region.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// What this response rendered as
    pub outcome: RenderOutcome,
    /// `false` when a newer submission already owned the region and this
    /// outcome was dropped
    pub applied: bool,
}

/// How a flow words its failures.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorFraming {
    /// Prefix for application errors
    pub error_prefix: &'static str,
    /// Used when the backend sent no `error` field
    pub fallback: &'static str,
    /// Prefix for transport failures
    pub network_prefix: &'static str,
    /// Appended after the transport failure description
    pub network_hint: &'static str,
}

impl ErrorFraming {
    pub(crate) fn render(&self, err: &ClientError) -> RenderOutcome {
        match err.kind() {
            ErrorKind::Transport => RenderOutcome::NetworkError {
                text: format!("{}{}{}", self.network_prefix, err, self.network_hint),
            },
            ErrorKind::Application => {
                let message = match err {
                    ClientError::Application {
                        message: Some(message),
                        ..
                    } if !message.is_empty() => message.clone(),
                    ClientError::Application { .. } => self.fallback.to_string(),
                    other => other.to_string(),
                };
                RenderOutcome::Error {
                    text: format!("{}{}", self.error_prefix, message),
                }
            }
        }
    }
}
