//! # ShareSync Testkit
//!
//! Test utilities for ShareSync.
//!
//! This crate provides:
//! - Share, capability and sharee fixtures
//! - Mock remote sources with canned responses and call counters
//! - Property-based test generators using proptest
//! - Tracing initialisation for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sharesync_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn refresh_replaces_cache() {
//!     init_test_logging("debug");
//!     let remote = MockShareSource::new();
//!     remote.set_list_response(Ok(vec![remote_private_share(1, PHOTOS_PATH, "work", "Work")]));
//!     // ... build a repository over the mock
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;
pub mod mock;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
    pub use crate::mock::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
pub use mock::*;
