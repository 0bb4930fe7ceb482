//! Common test utilities for wiki-enrich
//!
//! - Fixtures for bases, tables and summary documents
//! - Stores that record or fail write calls
//! - A mock summary server
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, server, stores};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let server = server::SummaryServer::start().await;
//!     let store = stores::FlakyStore::new(fixtures::titled_base(&["Cat"]));
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod stores;

pub use fixtures::{article_table, titled_base};
pub use server::SummaryServer;
pub use stores::FlakyStore;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
