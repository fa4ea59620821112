//! Predict command implementation

use crate::cli::output;
use crate::cli::session::start;
use crate::cli::PredictArgs;
use crate::client::PredictionRequest;

/// Build the prediction body from parsed CLI flags
pub fn build_request(args: &PredictArgs) -> PredictionRequest {
    PredictionRequest {
        gender: args.gender.clone(),
        age: args.age,
        hypertension: f64::from(args.hypertension),
        heart_disease: f64::from(args.heart_disease),
        ever_married: args.ever_married.clone(),
        work_type: args.work_type.clone(),
        residence_type: args.residence_type.clone(),
        avg_glucose_level: args.avg_glucose_level,
        bmi: args.bmi,
        smoking_status: args.smoking_status.clone(),
    }
}

/// Handle `strokewatch predict`. Returns whether the prediction succeeded.
pub async fn run_predict(args: PredictArgs) -> anyhow::Result<bool> {
    let (_config, app) = start(&args.connection)?;
    let request = build_request(&args);

    let submission = app.prediction.submit(&request).await;
    let result = app.prediction.result();
    let alert = app.prediction.alert();

    if args.json {
        println!(
            "{}",
            output::format_prediction_json(&request, &result, &alert)?
        );
    } else {
        println!("{}", output::format_patient_table(&request));
        for line in [&result, &alert].into_iter().filter_map(output::format_region) {
            println!("{}", line);
        }
    }

    let succeeded = submission.outcome().is_success();
    // Exiting would kill the alert mid-flight.
    if let Some(alert) = submission.alert {
        alert.join().await;
    }

    Ok(succeeded)
}
