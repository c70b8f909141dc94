//! # dnscache
//!
//! An in-process DNS cache with background refresh.
//!
//! `dnscache` memoizes hostname lookups so callers skip the resolver round
//! trip on every request, and keeps the cached answers fresh with a periodic
//! refresh task. When the upstream resolver fails, the last good answer is
//! kept and served.
//!
//! ## Features
//!
//! - **Resolve once, serve many**: `fetch` answers from memory after the first lookup
//! - **Background refresh**: every cached hostname is re-resolved on a fixed interval
//! - **Stale on failure**: failed lookups never evict a cached entry
//! - **Pluggable resolution**: system `getaddrinfo`, hickory-dns, or any `Resolve` impl
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dnscache::dns::{CacheOptions, CachingResolver};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = CachingResolver::new(
//!         Duration::from_secs(3),
//!         Duration::from_secs(10),
//!         CacheOptions::default(),
//!     )
//!     .unwrap();
//!     let addrs = cache.fetch("example.com").await.unwrap();
//!     println!("Addresses: {:?}", addrs);
//!     cache.stop();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions and IO error context helpers
//! - [`dns`] - Resolvers, the host cache, and the caching resolver

pub mod base;
pub mod dns;
