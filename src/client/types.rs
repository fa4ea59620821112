//! Request and response bodies for the backend's JSON endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label the backend uses for an elevated-risk prediction.
pub const ELEVATED_RISK_LABEL: &str = "Stroke";

/// Body of `POST /predict_stroke`.
///
/// Field names match the training dataset's columns, including the one
/// capitalized column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub gender: String,
    pub age: f64,
    /// 0 or 1
    pub hypertension: f64,
    /// 0 or 1
    pub heart_disease: f64,
    pub ever_married: String,
    pub work_type: String,
    #[serde(rename = "Residence_type")]
    pub residence_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
}

/// Success body of `POST /predict_stroke`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    /// Probability of the positive class, in `[0, 1]`
    pub probability: f64,
}

impl PredictionResponse {
    pub fn is_elevated_risk(&self) -> bool {
        self.prediction == ELEVATED_RISK_LABEL
    }
}

/// Body of `POST /alert_system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub patient_info: String,
    /// Probability with two decimals, as text (e.g. `"0.87"`)
    pub risk_level: String,
}

/// Body of `POST /chatbot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body of `POST /chatbot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: String,
    /// Some backends answer 2xx with an `error` in place of a reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /planner/{kind}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerRequest {
    pub input: String,
}

/// Success body of `POST /planner/{kind}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
}

/// Error body any endpoint may return with a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Planner type, used as the last path segment of `/planner/{kind}`.
///
/// The backend ships `food`, `exercise` and `medical` planners; other kinds
/// are passed through and left for the backend to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlannerKind(String);

impl PlannerKind {
    pub const FOOD: &'static str = "food";
    pub const EXERCISE: &'static str = "exercise";
    pub const MEDICAL: &'static str = "medical";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the display region this planner renders into.
    pub fn region_id(&self) -> String {
        format!("{}PlannerResult", self.0)
    }

    /// Planner kinds the stock backend understands.
    pub fn builtin() -> [PlannerKind; 3] {
        [
            PlannerKind(Self::FOOD.to_string()),
            PlannerKind(Self::EXERCISE.to_string()),
            PlannerKind(Self::MEDICAL.to_string()),
        ]
    }
}

impl FromStr for PlannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("planner type cannot be empty".to_string());
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!(
                "invalid planner type '{}': only letters, digits, '-' and '_' are allowed",
                s
            ));
        }
        Ok(PlannerKind(s.to_string()))
    }
}

impl TryFrom<String> for PlannerKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlannerKind> for String {
    fn from(kind: PlannerKind) -> Self {
        kind.0
    }
}

impl fmt::Display for PlannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> PredictionRequest {
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

    #[test]
    fn test_prediction_request_wire_names() {
        let value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(value["Residence_type"], "Urban");
        assert!(value.get("residence_type").is_none());
        assert_eq!(value["avg_glucose_level"], 228.69);
        assert_eq!(value["heart_disease"], 1.0);
    }

    #[test]
    fn test_nan_numeric_serializes_as_null() {
        let mut request = sample_request();
        request.bmi = f64::NAN;
        let value = serde_json::to_value(request).unwrap();
        assert!(value["bmi"].is_null());
    }

    #[test]
    fn test_elevated_risk_label() {
        let stroke: PredictionResponse =
            serde_json::from_value(json!({"prediction": "Stroke", "probability": 0.87})).unwrap();
        let no_stroke: PredictionResponse =
            serde_json::from_value(json!({"prediction": "No Stroke", "probability": 0.12}))
                .unwrap();
        assert!(stroke.is_elevated_risk());
        assert!(!no_stroke.is_elevated_risk());
    }

    #[test]
    fn test_error_body_tolerates_missing_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"error":"invalid bmi"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("invalid bmi"));
    }

    #[test]
    fn test_chat_reply_defaults_to_empty() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.reply.is_empty());
        assert!(reply.error.is_none());
    }

    #[test]
    fn test_chat_reply_reads_error_field() {
        let reply: ChatReply = serde_json::from_str(r#"{"error":"model offline"}"#).unwrap();
        assert!(reply.reply.is_empty());
        assert_eq!(reply.error.as_deref(), Some("model offline"));
    }

    #[test]
    fn test_planner_kind_parse() {
        let kind: PlannerKind = "diet".parse().unwrap();
        assert_eq!(kind.as_str(), "diet");
        assert_eq!(kind.region_id(), "dietPlannerResult");

        assert!("".parse::<PlannerKind>().is_err());
        assert!("../admin".parse::<PlannerKind>().is_err());
        assert!("food plan".parse::<PlannerKind>().is_err());
    }

    #[test]
    fn test_planner_kind_builtin() {
        let names: Vec<String> = PlannerKind::builtin()
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(names, vec!["food", "exercise", "medical"]);
    }

    #[test]
    fn test_planner_kind_serde_validates() {
        let kind: PlannerKind = serde_json::from_str("\"exercise\"").unwrap();
        assert_eq!(kind.as_str(), "exercise");
        assert!(serde_json::from_str::<PlannerKind>("\"a/b\"").is_err());
    }
}
