//! End-to-end flows through the HTTP backend against wiremock servers.

use serde_json::json;
use strokewatch::app::StrokeApp;
use strokewatch::client::{PlannerKind, PredictionRequest};
use strokewatch::config::StrokewatchConfig;
use strokewatch::display::{RegionState, Tone};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> StrokewatchConfig {
    let mut config = StrokewatchConfig::default();
    config.backend.base_url = server.uri();
    config.backend.timeout_seconds = 5;
    config
}

fn patient() -> PredictionRequest {
    PredictionRequest {
        gender: "Female".to_string(),
        age: 79.0,
        hypertension: 1.0,
        heart_disease: 0.0,
        ever_married: "Yes".to_string(),
        work_type: "Self-employed".to_string(),
        residence_type: "Rural".to_string(),
        avg_glucose_level: 174.12,
        bmi: 24.0,
        smoking_status: "never smoked".to_string(),
    }
}

#[tokio::test]
async fn test_stroke_prediction_posts_alert() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict_stroke"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "gender": "Female",
            "Residence_type": "Rural",
            "hypertension": 1.0
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": "Stroke", "probability": 0.87})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/alert_system"))
        .and(body_json(json!({"patient_info": "User Input", "risk_level": "0.87"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Alert processed",
            "message": "Caregivers would be notified."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = StrokeApp::from_config(&config_for(&server)).unwrap();
    let submission = app.prediction.submit(&patient()).await;
    submission.alert.unwrap().join().await;

    let result = app.prediction.result();
    assert_eq!(result.text, "Prediction: Stroke (Probability: 87.00%)");
    assert_eq!(result.tone, Some(Tone::Danger));
    assert!(app.prediction.alert().visible);
}

#[tokio::test]
async fn test_no_stroke_prediction_sends_no_alert() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict_stroke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": "No Stroke", "probability": 0.12})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/alert_system"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = StrokeApp::from_config(&config_for(&server)).unwrap();
    let submission = app.prediction.submit(&patient()).await;

    assert!(submission.alert.is_none());
    assert_eq!(
        app.prediction.result().text,
        "Prediction: No Stroke (Probability: 12.00%)"
    );
}

#[tokio::test]
async fn test_prediction_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict_stroke"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid bmi"})))
        .mount(&server)
        .await;

    let app = StrokeApp::from_config(&config_for(&server)).unwrap();
    app.prediction.submit(&patient()).await;

    let result = app.prediction.result();
    assert_eq!(result.state, RegionState::Error);
    assert_eq!(result.text, "Error: invalid bmi");
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let mut config = StrokewatchConfig::default();
    config.backend.base_url = "http://invalid-host-that-does-not-exist:9999".to_string();
    let app = StrokeApp::from_config(&config).unwrap();

    app.prediction.submit(&patient()).await;

    let result = app.prediction.result();
    assert_eq!(result.state, RegionState::NetworkError);
    assert!(result.text.starts_with("Network error: "));
    assert!(result
        .text
        .ends_with("Please ensure the backend server is running."));
}

#[tokio::test]
async fn test_chat_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chatbot"))
        .and(body_json(json!({"message": "hello"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi! Ask me about stroke prevention."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = StrokeApp::from_config(&config_for(&server)).unwrap();
    let exchange = app.chat.send("hello").await.unwrap();

    assert_eq!(exchange.reply.text, "Hi! Ask me about stroke prevention.");
    assert_eq!(app.chat.transcript().typing_count(), 0);
}

#[tokio::test]
async fn test_planner_round_trip_and_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/planner/food"))
        .and(body_json(json!({"input": "diabetic, 60"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plan": "Eat more fiber."})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/planner/yoga"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid planner type."})),
        )
        .mount(&server)
        .await;

    let app = StrokeApp::from_config(&config_for(&server)).unwrap();
    let food: PlannerKind = "food".parse().unwrap();
    let yoga: PlannerKind = "yoga".parse().unwrap();

    let ok = app.planner.recommend(&food, "diabetic, 60").await;
    let err = app.planner.recommend(&yoga, "flexibility").await;

    assert_eq!(ok.outcome.text(), "Eat more fiber.");
    assert_eq!(err.outcome.text(), "Error: Invalid planner type.");
    assert_eq!(
        app.planner.snapshot(&food).unwrap().state,
        RegionState::Success
    );
}
