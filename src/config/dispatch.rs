//! Dispatch ordering settings

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which settlement wins a display region when submissions overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Only the newest submission may render; older responses are dropped.
    #[default]
    LatestSubmission,
    /// Whichever response arrives last overwrites the region.
    LastResponse,
}

impl FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "latest_submission" => Ok(OrderingPolicy::LatestSubmission),
            "last_response" => Ok(OrderingPolicy::LastResponse),
            _ => Err(format!("Invalid ordering policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub ordering: OrderingPolicy,
}
