//! Summary API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where and how page summaries are requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryApiConfig {
    /// Endpoint the percent-encoded title is appended to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Append `redirect=true` so redirect pages resolve to their target
    #[serde(default = "default_true")]
    pub follow_redirects: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout; unset means a stalled request blocks the run
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SummaryApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            follow_redirects: true,
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}
