use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

use trust_dns_resolver::Resolver;

use super::error::ResolveError;
use super::types::{MxCandidate, Resolution};

/// Abstraction over DNS lookups so the pipeline can be exercised against a
/// stub in tests. Lookup failures are swallowed here (returned as empty) —
/// the caller never sees them; it proceeds to the A/AAAA fallback instead.
pub(crate) trait LookupMx: Send + Sync {
    fn lookup_mx(&self, domain: &str) -> Vec<MxCandidate>;
    fn lookup_ip(&self, domain: &str) -> Vec<IpAddr>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Vec<MxCandidate> {
        match self.mx_lookup(domain) {
            Ok(lookup) => lookup
                .iter()
                .map(|mx| {
                    let host = mx.exchange().to_utf8();
                    MxCandidate::new(mx.preference(), normalize_exchange(host))
                })
                .collect(),
            Err(err) => {
                tracing::debug!(domain, %err, "MX lookup failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn lookup_ip(&self, domain: &str) -> Vec<IpAddr> {
        match self.lookup_ip(domain) {
            Ok(lookup) => lookup.iter().collect(),
            Err(err) => {
                tracing::debug!(domain, %err, "A/AAAA lookup failed, treating as empty");
                Vec::new()
            }
        }
    }
}

fn normalize_exchange(host: String) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

static SYSTEM_RESOLVER: OnceLock<Option<Arc<Resolver>>> = OnceLock::new();

fn system_resolver() -> Option<Arc<Resolver>> {
    SYSTEM_RESOLVER
        .get_or_init(|| match Resolver::from_system_conf() {
            Ok(resolver) => Some(Arc::new(resolver)),
            Err(err) => {
                tracing::warn!(%err, "resolver initialization failed, MX/A lookups will be empty");
                None
            }
        })
        .clone()
}

/// Resolves `ascii_domain`'s mail exchangers, falling back to A/AAAA when no
/// MX records exist. `max_mx` truncates the candidate list after sorting.
/// Resolver construction failure is treated as an empty result — it is
/// never surfaced as a typed error from this function.
pub fn resolve(ascii_domain: &str, max_mx: usize) -> Resolution {
    match system_resolver() {
        Some(resolver) => resolve_with(resolver.as_ref(), ascii_domain, max_mx),
        None => Resolution::default(),
    }
}

/// Builds a fresh system resolver, surfacing construction failure. Kept
/// internal: every public entry point degrades to an empty result instead
/// of exposing resolver setup errors.
#[allow(dead_code)]
pub(crate) fn build_resolver() -> Result<Resolver, ResolveError> {
    Resolver::from_system_conf().map_err(|source| ResolveError::Init { source: source.into() })
}

pub(crate) fn resolve_with<R: LookupMx>(
    resolver: &R,
    ascii_domain: &str,
    max_mx: usize,
) -> Resolution {
    let mut records = resolver.lookup_mx(ascii_domain);
    dedup_keep_min_preference(&mut records);
    records.sort_by_key(|r| r.preference);

    if !records.is_empty() {
        records.truncate(max_mx.max(1));
        return Resolution {
            mx_hosts: records,
            domain_has_mx: true,
        };
    }

    let addrs = resolver.lookup_ip(ascii_domain);
    if addrs.is_empty() {
        return Resolution::default();
    }

    Resolution {
        mx_hosts: vec![MxCandidate::new(0, ascii_domain)],
        domain_has_mx: false,
    }
}

/// A host appears at most once; if multiple preferences are returned for
/// the same host, the lowest wins. Insertion order is preserved for
/// tie-breaking, matching a stable sort afterwards.
fn dedup_keep_min_preference(records: &mut Vec<MxCandidate>) {
    let mut best: Vec<MxCandidate> = Vec::with_capacity(records.len());
    for record in records.drain(..) {
        if let Some(existing) = best.iter_mut().find(|r: &&mut MxCandidate| r.host == record.host)
        {
            if record.preference < existing.preference {
                existing.preference = record.preference;
            }
        } else {
            best.push(record);
        }
    }
    *records = best;
}
