//! Construction options for [`CachingResolver`](super::CachingResolver).

use super::Resolve;
use std::{fmt, sync::Arc, time::Duration};
use tracing::Dispatch;

/// Refresh interval used when a zero interval is requested.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3);

/// Per-lookup timeout used when a zero timeout is requested.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Callback invoked after each completed background refresh pass.
pub type RefreshListener = Arc<dyn Fn() + Send + Sync>;

/// Optional collaborators of a caching resolver.
///
/// Every field has a working default, so `CacheOptions::default()` yields a
/// cache backed by the system resolver that logs through the global
/// `tracing` subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use dnscache::dns::{CacheOptions, HickoryResolver};
/// use std::sync::Arc;
///
/// let options = CacheOptions::new()
///     .resolver(Arc::new(HickoryResolver::new()))
///     .on_refreshed(|| println!("cache refreshed"));
/// ```
#[derive(Clone, Default)]
pub struct CacheOptions {
    pub(crate) resolver: Option<Arc<dyn Resolve>>,
    pub(crate) dispatch: Option<Dispatch>,
    pub(crate) on_refreshed: Option<RefreshListener>,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the resolution function used by lookups and refreshes.
    ///
    /// Defaults to [`GaiResolver`](super::GaiResolver).
    pub fn resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Routes refresh diagnostics to `dispatch` instead of the global subscriber.
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Registers a callback run once after every background refresh pass.
    pub fn on_refreshed<F>(mut self, listener: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_refreshed = Some(Arc::new(listener));
        self
    }
}

impl fmt::Debug for CacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("custom_resolver", &self.resolver.is_some())
            .field("dispatch", &self.dispatch.is_some())
            .field("on_refreshed", &self.on_refreshed.is_some())
            .finish()
    }
}

/// Substitutes `default` for a zero duration.
pub(crate) fn or_default(value: Duration, default: Duration) -> Duration {
    if value.is_zero() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(Duration::ZERO, DEFAULT_REFRESH_INTERVAL), Duration::from_secs(3));
        assert_eq!(or_default(Duration::ZERO, DEFAULT_LOOKUP_TIMEOUT), Duration::from_secs(10));
        assert_eq!(
            or_default(Duration::from_millis(5), DEFAULT_LOOKUP_TIMEOUT),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn test_default_options_are_empty() {
        let options = CacheOptions::default();
        assert!(options.resolver.is_none());
        assert!(options.dispatch.is_none());
        assert!(options.on_refreshed.is_none());
    }

    #[test]
    fn test_debug_hides_collaborators() {
        let options = CacheOptions::new().on_refreshed(|| {});
        let debug = format!("{:?}", options);
        assert!(debug.contains("on_refreshed: true"));
        assert!(debug.contains("custom_resolver: false"));
    }
}
