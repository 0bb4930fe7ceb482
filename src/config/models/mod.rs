//! Configuration data models

#![allow(missing_docs)]

pub mod enrich;
pub mod logging;
pub mod summary_api;
pub mod table;
pub mod throttle;

pub use enrich::*;
pub use logging::*;
pub use summary_api::*;
pub use table::*;
pub use throttle::*;

/// Default summary endpoint
pub fn default_endpoint() -> String {
    "https://en.wikipedia.org/api/rest_v1/page/summary".to_string()
}

/// Default User-Agent sent to the summary API
pub fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

pub fn default_true() -> bool {
    true
}

/// Default inter-request delay in milliseconds
pub fn default_request_delay_ms() -> u64 {
    50
}

/// Default (and maximum) records per store write
pub fn default_max_records_per_update() -> usize {
    crate::core::store::MAX_RECORDS_PER_WRITE
}
