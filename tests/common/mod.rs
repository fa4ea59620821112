//! Shared test utilities for strokewatch integration tests.
//!
//! Provides a scripted in-process backend and request builders so the
//! interaction components can be exercised without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use strokewatch::client::{
    AlertRequest, ChatReply, ChatRequest, ClientError, PlanResponse, PlannerKind, PlannerRequest,
    PredictionRequest, PredictionResponse, StrokeBackend,
};

// =============================================================================
// Scripted backend
// =============================================================================

struct Scripted<T> {
    delay: Duration,
    result: Result<T, ClientError>,
}

/// Backend that replays queued results in call order, optionally after a delay.
///
/// An empty queue answers with a transport error so a missing script shows up
/// as a network error in the rendered outcome.
#[derive(Default)]
pub struct ScriptedBackend {
    predictions: Mutex<VecDeque<Scripted<PredictionResponse>>>,
    chats: Mutex<VecDeque<Scripted<ChatReply>>>,
    plans: Mutex<VecDeque<Scripted<PlanResponse>>>,
    alert_failure: Mutex<Option<ClientError>>,
    /// Every alert request received, in order
    pub alerts: Mutex<Vec<AlertRequest>>,
    /// Every chat message received, in order
    pub chat_messages: Mutex<Vec<String>>,
    /// Every planner kind requested, in order
    pub plan_kinds: Mutex<Vec<String>>,
}

fn unscripted<T>() -> Result<T, ClientError> {
    Err(ClientError::Transport("no scripted response".to_string()))
}

async fn replay<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T, ClientError> {
    let next = queue.lock().unwrap().pop_front();
    match next {
        Some(scripted) => {
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            scripted.result
        }
        None => unscripted(),
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prediction(self, result: Result<PredictionResponse, ClientError>) -> Self {
        self.prediction_after(Duration::ZERO, result)
    }

    pub fn prediction_after(
        self,
        delay: Duration,
        result: Result<PredictionResponse, ClientError>,
    ) -> Self {
        self.predictions
            .lock()
            .unwrap()
            .push_back(Scripted { delay, result });
        self
    }

    pub fn chat(self, result: Result<ChatReply, ClientError>) -> Self {
        self.chat_after(Duration::ZERO, result)
    }

    pub fn chat_after(self, delay: Duration, result: Result<ChatReply, ClientError>) -> Self {
        self.chats
            .lock()
            .unwrap()
            .push_back(Scripted { delay, result });
        self
    }

    pub fn plan(self, result: Result<PlanResponse, ClientError>) -> Self {
        self.plans.lock().unwrap().push_back(Scripted {
            delay: Duration::ZERO,
            result,
        });
        self
    }

    pub fn failing_alerts(self, error: ClientError) -> Self {
        *self.alert_failure.lock().unwrap() = Some(error);
        self
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

#[async_trait]
impl StrokeBackend for ScriptedBackend {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictionResponse, ClientError> {
        replay(&self.predictions).await
    }

    async fn send_alert(&self, alert: &AlertRequest) -> Result<(), ClientError> {
        self.alerts.lock().unwrap().push(alert.clone());
        match self.alert_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.chat_messages
            .lock()
            .unwrap()
            .push(request.message.clone());
        replay(&self.chats).await
    }

    async fn plan(
        &self,
        kind: &PlannerKind,
        _request: &PlannerRequest,
    ) -> Result<PlanResponse, ClientError> {
        self.plan_kinds.lock().unwrap().push(kind.to_string());
        replay(&self.plans).await
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn stroke(probability: f64) -> Result<PredictionResponse, ClientError> {
    Ok(PredictionResponse {
        prediction: "Stroke".to_string(),
        probability,
    })
}

pub fn no_stroke(probability: f64) -> Result<PredictionResponse, ClientError> {
    Ok(PredictionResponse {
        prediction: "No Stroke".to_string(),
        probability,
    })
}

pub fn app_error<T>(status: u16, message: &str) -> Result<T, ClientError> {
    Err(ClientError::Application {
        status,
        message: Some(message.to_string()),
    })
}

pub fn transport_error<T>(message: &str) -> Result<T, ClientError> {
    Err(ClientError::Transport(message.to_string()))
}

pub fn reply(text: &str) -> Result<ChatReply, ClientError> {
    Ok(ChatReply {
        reply: text.to_string(),
        error: None,
    })
}

pub fn plan(text: &str) -> Result<PlanResponse, ClientError> {
    Ok(PlanResponse {
        plan: text.to_string(),
    })
}

/// A complete, valid patient (row 1 of the public stroke dataset).
pub fn sample_patient() -> PredictionRequest {
    PredictionRequest {
        gender: "Male".to_string(),
        age: 67.0,
        hypertension: 0.0,
        heart_disease: 1.0,
        ever_married: "Yes".to_string(),
        work_type: "Private".to_string(),
        residence_type: "Urban".to_string(),
        avg_glucose_level: 228.69,
        bmi: 36.6,
        smoking_status: "formerly smoked".to_string(),
    }
}
