//! Summary providers
//!
//! The fetcher only depends on [`SummaryApi`]; [`wikipedia::WikipediaClient`]
//! is the production implementation.

mod error;
pub mod wikipedia;

pub use error::ProviderError;
pub use wikipedia::{PageImage, PageSummary, WikipediaClient};

use async_trait::async_trait;

/// Source of page summaries keyed by article title
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Look up the summary for one title
    async fn page_summary(&self, title: &str) -> Result<PageSummary, ProviderError>;
}
