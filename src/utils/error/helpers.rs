//! Helper functions for creating and inspecting errors

use super::types::EnrichError;

impl EnrichError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn permission_denied<S: Into<String>>(reason: S) -> Self {
        Self::PermissionDenied(reason.into())
    }

    /// Whether any record was persisted before the error surfaced
    pub fn left_partial_writes(&self) -> bool {
        matches!(self, Self::BatchWrite { applied_batches, .. } if *applied_batches > 0)
    }

    /// Short, stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::PermissionDenied(_) => "permission_denied",
            Self::RunInProgress => "run_in_progress",
            Self::Fetch { .. } => "fetch",
            Self::BatchWrite { .. } => "batch_write",
            Self::Store(_) => "store",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
            Self::Io(_) => "io",
        }
    }
}
