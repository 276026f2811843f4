//! Cache statistics.

mod cache_stats;
pub(crate) mod stats_counter;

pub use cache_stats::CacheStats;
