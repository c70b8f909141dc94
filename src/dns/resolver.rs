//! Caching resolver.
//!
//! [`CachingResolver`] memoizes hostname lookups in a [`HostCache`] and keeps
//! them fresh with a background refresh task, so callers pay the resolver
//! round trip once per hostname and keep getting the last good answer while
//! the upstream resolver is failing.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnscache::dns::{CacheOptions, CachingResolver};
//! use std::time::Duration;
//!
//! let cache = CachingResolver::new(
//!     Duration::from_secs(3),
//!     Duration::from_secs(10),
//!     CacheOptions::default(),
//! )?;
//!
//! // First call resolves, later calls are served from memory.
//! let addrs = cache.fetch("example.com").await?;
//! cache.stop();
//! ```

use super::{
    cache::HostCache,
    options::{
        or_default, CacheOptions, RefreshListener, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_REFRESH_INTERVAL,
    },
    refresh::{RefreshSummary, Scheduler},
    GaiResolver, Name, Resolve,
};
use crate::base::neterror::NetError;
use std::{fmt, net::IpAddr, sync::Arc, time::Duration};
use tracing::Dispatch;

/// State shared between the caller-facing handle and the refresh task.
pub(crate) struct Shared {
    cache: HostCache,
    resolver: Arc<dyn Resolve>,
    lookup_timeout: Duration,
    dispatch: Option<Dispatch>,
    on_refreshed: Option<RefreshListener>,
}

impl Shared {
    /// Resolves `name` within `timeout` and stores the result on success.
    ///
    /// This is the only write path into the cache. A failed lookup leaves
    /// any existing entry untouched.
    pub(crate) async fn lookup_ip(
        &self,
        name: Name,
        timeout: Duration,
    ) -> Result<Vec<IpAddr>, NetError> {
        let addrs = match tokio::time::timeout(timeout, self.resolver.resolve(name.clone())).await
        {
            Ok(result) => result?,
            Err(_) => return Err(NetError::timed_out(name.as_str(), timeout)),
        };

        self.cache.set(name, addrs.clone());
        Ok(addrs)
    }

    /// Re-resolves every cached hostname, one after another.
    ///
    /// A failure is logged and skipped; it never aborts the pass.
    pub(crate) async fn refresh(&self) -> RefreshSummary {
        self.refresh_until(|| false).await
    }

    /// Like [`refresh`](Self::refresh), but checks `stopped` before each
    /// hostname and ends the pass early once it returns true.
    pub(crate) async fn refresh_until(&self, stopped: impl Fn() -> bool) -> RefreshSummary {
        let names = self.cache.snapshot_keys();
        let mut summary = RefreshSummary::default();

        for name in names {
            if stopped() {
                self.in_scope(|| tracing::debug!("DNS refresh pass cut short by stop"));
                break;
            }
            match self.lookup_ip(name.clone(), self.lookup_timeout).await {
                Ok(_) => summary.refreshed += 1,
                Err(e) => {
                    summary.failed += 1;
                    self.in_scope(|| {
                        tracing::warn!(
                            domain = %name,
                            error = %e,
                            transient = e.is_transient(),
                            "failed to refresh DNS cache"
                        )
                    });
                }
            }
        }

        if summary.total() > 0 {
            self.in_scope(|| {
                tracing::debug!(
                    refreshed = summary.refreshed,
                    failed = summary.failed,
                    "DNS cache refresh pass complete"
                )
            });
        }
        summary
    }

    pub(crate) fn notify_refreshed(&self) {
        if let Some(listener) = &self.on_refreshed {
            listener();
        }
    }

    /// Runs `f` with the configured dispatcher as the default subscriber.
    pub(crate) fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

/// DNS cache that keeps resolved addresses in memory and refreshes them on
/// a fixed interval.
///
/// The refresh task starts in [`new`](Self::new) and runs until
/// [`stop`](Self::stop) is called or the resolver is dropped. Share one
/// instance behind an `Arc` rather than cloning it; each instance owns its
/// own task and cache.
pub struct CachingResolver {
    shared: Arc<Shared>,
    scheduler: Scheduler,
    refresh_interval: Duration,
}

impl CachingResolver {
    /// Creates a caching resolver and starts its refresh task.
    ///
    /// A zero `refresh_interval` becomes [`DEFAULT_REFRESH_INTERVAL`] and a
    /// zero `lookup_timeout` becomes [`DEFAULT_LOOKUP_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`NetError::NoAsyncRuntime`] when called outside a tokio
    /// runtime, since the refresh task could not be started.
    pub fn new(
        refresh_interval: Duration,
        lookup_timeout: Duration,
        options: CacheOptions,
    ) -> Result<Self, NetError> {
        let refresh_interval = or_default(refresh_interval, DEFAULT_REFRESH_INTERVAL);
        let lookup_timeout = or_default(lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);

        let CacheOptions {
            resolver,
            dispatch,
            on_refreshed,
        } = options;

        let shared = Arc::new(Shared {
            cache: HostCache::new(),
            resolver: resolver.unwrap_or_else(|| Arc::new(GaiResolver::new())),
            lookup_timeout,
            dispatch,
            on_refreshed,
        });

        let scheduler = Scheduler::spawn(Arc::clone(&shared), refresh_interval)?;

        Ok(Self {
            shared,
            scheduler,
            refresh_interval,
        })
    }

    /// Resolves `name` and caches the result, bounded by the configured
    /// lookup timeout.
    ///
    /// Always queries the resolver; use [`fetch`](Self::fetch) to prefer the
    /// cache. On failure the previous entry, if any, is kept.
    pub async fn lookup_ip(&self, name: impl Into<Name>) -> Result<Vec<IpAddr>, NetError> {
        self.shared
            .lookup_ip(name.into(), self.shared.lookup_timeout)
            .await
    }

    /// Like [`lookup_ip`](Self::lookup_ip) with a caller-chosen deadline.
    pub async fn lookup_ip_with_timeout(
        &self,
        name: impl Into<Name>,
        timeout: Duration,
    ) -> Result<Vec<IpAddr>, NetError> {
        self.shared.lookup_ip(name.into(), timeout).await
    }

    /// Returns the cached addresses for `name`, resolving only on a miss.
    pub async fn fetch(&self, name: impl Into<Name>) -> Result<Vec<IpAddr>, NetError> {
        self.fetch_with_timeout(name, self.shared.lookup_timeout)
            .await
    }

    /// Like [`fetch`](Self::fetch); `timeout` only applies on a cache miss.
    pub async fn fetch_with_timeout(
        &self,
        name: impl Into<Name>,
        timeout: Duration,
    ) -> Result<Vec<IpAddr>, NetError> {
        let name = name.into();
        if let Some(addrs) = self.shared.cache.get(&name) {
            return Ok(addrs);
        }

        self.shared
            .in_scope(|| tracing::debug!(domain = %name, "DNS cache miss"));
        self.shared.lookup_ip(name, timeout).await
    }

    /// Returns the cached addresses for `name` without resolving.
    pub fn cached(&self, name: impl Into<Name>) -> Option<Vec<IpAddr>> {
        self.shared.cache.get(&name.into())
    }

    /// Runs one refresh pass now and waits for it to finish.
    ///
    /// Independent of the background task: it works after [`stop`](Self::stop)
    /// too, and it does not invoke the refresh listener.
    pub async fn refresh(&self) -> RefreshSummary {
        self.shared.refresh().await
    }

    /// Stops the background refresh task.
    ///
    /// Cached entries stay readable. Calling this again has no effect.
    pub fn stop(&self) {
        if self.scheduler.stop() {
            tracing::debug!("DNS refresh stop requested");
        }
    }

    /// Stops the background refresh task and waits until it has exited.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }

    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_stopped()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.shared.lookup_timeout
    }

    /// Get number of cached hostnames.
    pub fn len(&self) -> usize {
        self.shared.cache.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.cache.is_empty()
    }
}

impl fmt::Debug for CachingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingResolver")
            .field("refresh_interval", &self.refresh_interval)
            .field("lookup_timeout", &self.shared.lookup_timeout)
            .field("cached_hosts", &self.shared.cache.len())
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}
