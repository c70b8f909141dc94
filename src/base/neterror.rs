use std::{io, sync::Arc, time::Duration};
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Host resolution errors
    #[error("Name not resolved: {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Name resolution failed")]
    NameResolutionFailed,

    // DNS errors
    #[error("DNS server failed")]
    DnsServerFailed,
    #[error("DNS lookup for {domain} timed out after {timeout:?}")]
    DnsTimedOut { domain: String, timeout: Duration },

    // Configuration errors (custom codes starting at -10000)
    #[error("No async runtime available to run the DNS refresh task")]
    NoAsyncRuntime,
}

impl NetError {
    /// Wraps an IO error from a lookup of `domain`.
    pub fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(source),
        }
    }

    pub fn timed_out(domain: &str, timeout: Duration) -> Self {
        NetError::DnsTimedOut {
            domain: domain.to_string(),
            timeout,
        }
    }

    /// Returns true for errors where a later lookup of the same name may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NetError::DnsServerFailed | NetError::DnsTimedOut { .. } | NetError::NameResolutionFailed
        )
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::NameResolutionFailed => -137,
            NetError::DnsServerFailed => -802,
            NetError::DnsTimedOut { .. } => -803,
            NetError::NoAsyncRuntime => -10001,
        }
    }
}
