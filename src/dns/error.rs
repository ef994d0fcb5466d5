use thiserror::Error;

/// Resolver setup failures. Lookup failures themselves are non-fatal and
/// never produce a `ResolveError` — only building the underlying resolver
/// can fail this way, and even that is treated as an empty-MX response by
/// [`super::resolve`] rather than propagated.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("resolver initialization failed: {source}")]
    Init {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}
