//! Request pacing and write sizing

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Fixed pause after every summary request
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Records per store write call, at most 50
    #[serde(default = "default_max_records_per_update")]
    pub max_records_per_update: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            max_records_per_update: default_max_records_per_update(),
        }
    }
}
