//! Top-level configuration document

use super::*;
use serde::{Deserialize, Serialize};

/// Everything read from `enrich.yaml`; every section may be omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichConfig {
    #[serde(default)]
    pub summary_api: SummaryApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
