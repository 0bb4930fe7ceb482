//! Error handling for the enrichment pipeline
//!
//! Fetch and write failures are returned, never swallowed: the controller
//! decides to stop and reset its state on the first one.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{EnrichError, Result};
