//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the DNS abstraction layer. The caching resolver sits on
//! top of any `Resolve` implementation.

use crate::base::neterror::NetError;
use std::{fmt, future::Future, net::IpAddr, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers. It is also the key
/// of the host cache.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl From<&Name> for Name {
    fn from(value: &Name) -> Self {
        value.clone()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for the `Future` type returned by a DNS resolver.
///
/// Resolves to the addresses in the order the resolver produced them.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Vec<IpAddr>, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// This is the resolution function the cache delegates to, equivalent
/// to Chromium's `HostResolver`. Implementations must be thread-safe.
///
/// # Contract
///
/// - A successful resolution returns a non-empty, order-preserved list.
/// - The returned future must be cancel-safe: dropping it abandons the
///   lookup. The cache enforces deadlines by dropping the future, so an
///   implementation that blocks the executor thread cannot be timed out.
/// - Uses `&self` for concurrent resolution without mutable access.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// A [`Resolve`] implementation backed by a closure.
///
/// Created by [`resolve_fn`].
#[derive(Clone)]
pub struct ResolveFn<F> {
    f: F,
}

/// Adapts an async closure into a [`Resolve`] implementation.
///
/// # Example
///
/// ```rust,ignore
/// use dnscache::dns::{resolve_fn, Name};
/// use std::net::{IpAddr, Ipv4Addr};
///
/// let resolver = resolve_fn(|_name: Name| async move {
///     Ok::<_, NetError>(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
/// });
/// ```
pub fn resolve_fn<F, Fut>(f: F) -> ResolveFn<F>
where
    F: Fn(Name) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<IpAddr>, NetError>> + Send + 'static,
{
    ResolveFn { f }
}

impl<F, Fut> Resolve for ResolveFn<F>
where
    F: Fn(Name) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<IpAddr>, NetError>> + Send + 'static,
{
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin((self.f)(name))
    }
}

impl<F> fmt::Debug for ResolveFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveFn").finish_non_exhaustive()
    }
}
