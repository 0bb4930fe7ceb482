//! Wikipedia REST `page/summary` provider

mod client;
mod types;

pub use client::{PROVIDER_NAME, WikipediaClient};
pub use types::{PageImage, PageSummary};
