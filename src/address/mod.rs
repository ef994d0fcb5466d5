//! Syntax normalization: splits an address, IDNA-encodes the domain, and
//! enforces a conservative grammar. Pure — no I/O.

mod domain;
mod local;
mod types;

pub use types::{Address, SyntaxError};

use domain::check_domain;
use local::check_local;

/// Normalizes `email` into an [`Address`], or fails with the first
/// [`SyntaxError`] encountered. Rules are applied in order: split, trim,
/// IDNA-encode the domain, then validate local part and domain grammar.
pub fn normalize(email: &str) -> Result<Address, SyntaxError> {
    let Some(at) = email.rfind('@') else {
        return Err(SyntaxError::MissingAt);
    };
    let (local_raw, domain_raw) = (&email[..at], &email[at + 1..]);
    let local = local_raw.trim();
    let domain = domain_raw.trim();

    check_local(local)?;
    let ascii_domain = check_domain(domain)?;

    Ok(Address {
        original: email.to_string(),
        local: local.to_string(),
        domain: domain.to_string(),
        ascii_domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_at() {
        let addr = normalize("a@b@c.example").expect("should parse");
        assert_eq!(addr.local, "a@b");
        assert_eq!(addr.ascii_domain, "c.example");
    }

    #[test]
    fn missing_at_fails() {
        assert_eq!(normalize("no-at-sign"), Err(SyntaxError::MissingAt));
    }

    #[test]
    fn trims_whitespace_around_split() {
        let addr = normalize(" alice @ example.com ").expect("should parse");
        assert_eq!(addr.local, "alice");
        assert_eq!(addr.ascii_domain, "example.com");
    }

    #[test]
    fn double_dots_in_local_rejected() {
        assert_eq!(
            normalize("bad..dots@example.com"),
            Err(SyntaxError::LocalDots)
        );
    }

    #[test]
    fn local_part_validated_before_domain() {
        // A bad local part must surface before a bad domain is even reached,
        // even when the domain would itself fail its own grammar check.
        assert_eq!(
            normalize("bad..dots@a.c"),
            Err(SyntaxError::LocalDots)
        );
    }

    #[test]
    fn normalized_string_preserves_local_verbatim() {
        let addr = normalize("Alice.Bob@Example.COM").expect("should parse");
        assert_eq!(addr.local, "Alice.Bob");
        assert_eq!(addr.ascii_domain, "example.com");
        assert_eq!(addr.normalized(), "Alice.Bob@example.com");
    }

    #[test]
    fn idna_encodes_unicode_domain() {
        let addr = normalize("user@münchen.de").expect("should parse");
        assert!(addr.ascii_domain.starts_with("xn--"));
    }

    proptest::proptest! {
        #[test]
        fn normalize_is_idempotent_on_ascii_output(local in "[a-z]{1,20}", label in "[a-z]{1,20}") {
            let email = format!("{local}@{label}.com");
            if let Ok(addr) = normalize(&email) {
                let again = normalize(&addr.normalized()).expect("normalized output re-parses");
                proptest::prop_assert_eq!(addr.normalized(), again.normalized());
            }
        }
    }
}
