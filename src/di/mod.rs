//! Dependency injection seams for the host layer
//!
//! The fetcher and its cache sit behind traits so provider adapters and the
//! [`GitHostApi`](crate::api::GitHostApi) facade can be exercised without a
//! network or a disk.
//!
//! # Example (Testing)
//! ```
//! use lerna_changelog::di::{mocks::MockFetcher, JsonFetcher};
//! use std::sync::Arc;
//!
//! let fetcher: Arc<dyn JsonFetcher> = Arc::new(MockFetcher::new());
//! # let _ = fetcher;
//! ```

pub mod mocks;
pub mod traits;

// Re-export key types
pub use traits::{JsonFetcher, ResponseCache};
