//! Output formatting helpers for CLI commands

use crate::client::PredictionRequest;
use crate::display::{Author, Bubble, BubbleKind, RegionSnapshot, RegionState, Tone};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Icon for a settled region state
pub fn state_icon(state: RegionState) -> &'static str {
    match state {
        RegionState::Success => "✓",
        RegionState::Error => "✗",
        RegionState::NetworkError => "⚠",
        RegionState::Idle | RegionState::Pending => "·",
    }
}

fn paint(text: &str, tone: Option<Tone>) -> String {
    match tone {
        Some(Tone::Success) => text.green().to_string(),
        Some(Tone::Danger) => text.red().bold().to_string(),
        None => text.to_string(),
    }
}

/// Render a region as one line, or `None` when it is hidden.
pub fn format_region(region: &RegionSnapshot) -> Option<String> {
    if !region.visible {
        return None;
    }
    Some(format!(
        "{} {}",
        state_icon(region.state),
        paint(&region.text, region.tone)
    ))
}

/// Format the submitted patient fields as a table
pub fn format_patient_table(request: &PredictionRequest) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let rows: [(&str, String); 10] = [
        ("gender", request.gender.clone()),
        ("age", request.age.to_string()),
        ("hypertension", request.hypertension.to_string()),
        ("heart_disease", request.heart_disease.to_string()),
        ("ever_married", request.ever_married.clone()),
        ("work_type", request.work_type.clone()),
        ("Residence_type", request.residence_type.clone()),
        ("avg_glucose_level", request.avg_glucose_level.to_string()),
        ("bmi", request.bmi.to_string()),
        ("smoking_status", request.smoking_status.clone()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    table.to_string()
}

/// Format a prediction's request and both regions as JSON
pub fn format_prediction_json(
    request: &PredictionRequest,
    result: &RegionSnapshot,
    alert: &RegionSnapshot,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "request": request,
        "result": result,
        "alert": alert,
    }))
}

/// Format a single region as JSON
pub fn format_region_json(region: &RegionSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(region)
}

/// Render a chat bubble as a transcript line
pub fn format_bubble(bubble: &Bubble) -> String {
    match (bubble.author, bubble.kind) {
        (Author::User, _) => format!("{} {}", "you>".cyan().bold(), bubble.text),
        (Author::Bot, BubbleKind::Typing) => format!("{} {}", "bot>".bold(), bubble.text.dimmed()),
        (Author::Bot, BubbleKind::Error) => format!("{} {}", "bot>".bold(), bubble.text.red()),
        (Author::Bot, BubbleKind::Message) => format!("{} {}", "bot>".bold(), bubble.text),
    }
}
