//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async DNS resolution with support for:
//! - System DNS configuration auto-detection
//! - Dual-stack (IPv4 + IPv6) lookup
//!
//! Unlike `GaiResolver`, lookups never occupy a blocking thread, so a
//! deadline imposed by the cache cancels the query itself.

use super::{Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::{io, net::IpAddr};

/// Async DNS resolver backed by hickory-dns.
///
/// Each instance owns its own resolver and connection pool, so two caches
/// built with separate `HickoryResolver`s never share state. Clones share
/// the underlying resolver.
///
/// # Example
///
/// ```rust,ignore
/// use dnscache::dns::{CacheOptions, CachingResolver, HickoryResolver};
/// use std::{sync::Arc, time::Duration};
///
/// let options = CacheOptions::new().resolver(Arc::new(HickoryResolver::new()));
/// let cache = CachingResolver::new(Duration::from_secs(30), Duration::from_secs(5), options)?;
/// ```
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    ///
    /// Reads the system DNS configuration; if that fails, it falls back to
    /// hickory's default upstream servers.
    pub fn new() -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => {
                tracing::debug!("Using system DNS configuration");
                builder
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to read system DNS config, using defaults"
                );
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };

        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        Self {
            resolver: builder.build(),
        }
    }

    /// Creates a resolver from an explicit upstream configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        Self {
            resolver: builder.build(),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        Box::pin(async move {
            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                NetError::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, e.to_string()))
            })?;

            let addrs: Vec<IpAddr> = lookup.iter().collect();

            if addrs.is_empty() {
                return Err(NetError::dns_failed(
                    domain,
                    io::Error::new(io::ErrorKind::NotFound, "No addresses returned"),
                ));
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "hickory-dns resolution complete");
            Ok(addrs)
        })
    }
}
