//! The disposable-domain set: a fixed, case-insensitive set of known
//! disposable-mail domains, built at compile time so there is no runtime
//! initialization cost or race.

use phf::phf_set;

static DISPOSABLE_DOMAINS: phf::Set<&'static str> = phf_set! {
    "mailinator.com",
    "10minutemail.com",
    "guerrillamail.com",
    "yopmail.com",
    "tempmail.com",
    "temp-mail.org",
    "throwawaymail.com",
    "moakt.com",
    "trashmail.com",
    "dispostable.com",
    "getnada.com",
    "sharklasers.com",
    "maildrop.cc",
    "fakeinbox.com",
    "mintemail.com",
};

/// True if `ascii_domain` (already lowercased/IDNA-encoded) is a known
/// disposable-mail domain, or one of `extra` supplied by the caller. Depends
/// only on the domain string — never on the local part or network state.
pub fn is_disposable(ascii_domain: &str, extra: &[String]) -> bool {
    let domain = ascii_domain.to_ascii_lowercase();
    DISPOSABLE_DOMAINS.contains(domain.as_str())
        || extra.iter().any(|d| d.to_ascii_lowercase() == domain)
}
