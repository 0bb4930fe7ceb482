//! Core functionality
//!
//! Fetcher, batch writer and run controller, plus the seams they depend on:
//! the summary provider and the record store.

pub mod batch;
pub mod controller;
pub mod enrichment;
pub mod providers;
pub mod rate_limiter;
pub mod store;
pub mod types;
