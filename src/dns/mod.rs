//! DNS Resolution Module
//!
//! Provides a caching layer over pluggable DNS resolution:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver
//! - In-memory host cache refreshed by a background task
//!
//! # Architecture
//!
//! The `Resolve` trait is the resolution function at the bottom of the stack.
//! [`HostCache`] stores the last good answer per hostname, and
//! [`CachingResolver`] ties the two together: lookups write the cache,
//! fetches read it, and a refresh task re-resolves every cached hostname on
//! a fixed interval.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnscache::dns::{CacheOptions, CachingResolver};
//! use std::time::Duration;
//!
//! let cache = CachingResolver::new(Duration::from_secs(3), Duration::from_secs(10), CacheOptions::default())?;
//! for addr in cache.fetch("example.com").await? {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod cache;
mod gai;
mod hickory;
mod options;
mod refresh;
mod resolve;
mod resolver;

pub use cache::HostCache;
pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use options::{CacheOptions, RefreshListener, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_REFRESH_INTERVAL};
pub use refresh::RefreshSummary;
pub use resolve::{resolve_fn, Name, Resolve, ResolveFn, Resolving};
pub use resolver::CachingResolver;
