//! Provides a thread-safe, concurrent loading cache.

mod base_cache;
mod builder;
mod cache;
mod map_view;
mod table;
mod value_initializer;

pub use {
    builder::{CacheBuilder, ReloadMode},
    cache::LoadingCache,
    map_view::CacheMap,
};
