#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

//! A concurrent in-memory loading cache for Rust.
//!
//! A [`LoadingCache`][loading-cache] maps keys to values that it computes on
//! demand with a user supplied [`CacheLoader`]. On top of a concurrent hash
//! table it provides:
//!
//! - Load on miss, with at most one load in flight per key. Threads reading a
//!   key that is being loaded wait for that load and share its result.
//! - Refresh after write: a value older than the refresh duration is still
//!   returned, and is reloaded on the reading thread or on a background worker.
//! - Expiration after write and after access.
//! - Size-based eviction of the least recently accessed entries.
//! - Invalidation of a key or of all keys, which never cancels or loses a load
//!   in flight.
//! - Removal notifications and optional statistics.
//!
//! # Example
//!
//! ```rust
//! use loading_cache::{loader, sync::LoadingCache};
//!
//! use std::time::Duration;
//!
//! let cache = LoadingCache::builder()
//!     .refresh_after_write(Duration::from_secs(30))
//!     .expire_after_write(Duration::from_secs(5 * 60))
//!     .build(loader::from_fn(|user_id: &u64| -> Result<String, std::io::Error> {
//!         // Query a database here.
//!         Ok(format!("user-{user_id}"))
//!     }));
//!
//! assert_eq!(cache.get(&7).unwrap(), "user-7");
//! ```
//!
//! # Minimum Supported Rust Versions
//!
//! This crate's minimum supported Rust version (MSRV) is 1.65.
//!
//! [loading-cache]: ./sync/struct.LoadingCache.html

pub mod loader;
pub mod notification;
pub mod policy;
pub mod stats;
pub mod sync;
pub mod ticker;

pub(crate) mod common;

pub use common::error::{BoxError, LoadError};
pub use loader::CacheLoader;
pub use notification::RemovalCause;
pub use policy::Policy;
