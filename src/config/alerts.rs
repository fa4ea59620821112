//! Caregiver alert settings

use serde::{Deserialize, Serialize};

/// Controls the best-effort `/alert_system` notification fired on elevated risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub enabled: bool,
    /// Sent verbatim as `patient_info`
    pub patient_info: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            patient_info: "User Input".to_string(),
        }
    }
}
