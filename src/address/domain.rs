use super::types::SyntaxError;

/// IDNA-encodes `domain` and applies the label grammar. Returns the
/// lowercased ASCII (punycode) domain on success.
pub(crate) fn check_domain(domain: &str) -> Result<String, SyntaxError> {
    let ascii = idna::domain_to_ascii(domain).map_err(|_| SyntaxError::DomainIdna)?;
    let ascii = ascii.to_ascii_lowercase();

    if ascii.len() > 253 {
        return Err(SyntaxError::DomainLength);
    }

    let labels: Vec<&str> = ascii.split('.').collect();
    if labels.len() < 2 {
        return Err(SyntaxError::DomainTld);
    }

    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            return Err(SyntaxError::LabelLength);
        }
        if !is_valid_label(label) {
            return Err(SyntaxError::LabelChars);
        }
    }

    let tld = labels.last().expect("labels non-empty, checked above");
    if tld.len() < 2 {
        return Err(SyntaxError::TldLength);
    }

    Ok(ascii)
}

/// `^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$`
fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let is_alnum = |b: u8| b.is_ascii_alphanumeric();
    match bytes.len() {
        0 => false,
        1 => is_alnum(bytes[0]),
        _ => {
            is_alnum(bytes[0])
                && is_alnum(*bytes.last().expect("len > 1"))
                && bytes[1..bytes.len() - 1]
                    .iter()
                    .all(|&b| is_alnum(b) || b == b'-')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_domain_ok() {
        assert_eq!(check_domain("Example.com").unwrap(), "example.com");
    }

    #[test]
    fn label_boundary_63_ok_64_fails() {
        let ok_label = "a".repeat(63);
        assert!(check_domain(&format!("{ok_label}.com")).is_ok());
        let too_long = "a".repeat(64);
        assert_eq!(
            check_domain(&format!("{too_long}.com")),
            Err(SyntaxError::LabelLength)
        );
    }

    #[test]
    fn domain_boundary_253_ok_254_fails() {
        let full = "a".repeat(63);
        let domain_253 = format!("{full}.{full}.{full}.{}", "a".repeat(61));
        assert_eq!(domain_253.len(), 253);
        assert!(check_domain(&domain_253).is_ok());

        let domain_254 = format!("{full}.{full}.{full}.{}", "a".repeat(62));
        assert_eq!(domain_254.len(), 254);
        assert_eq!(check_domain(&domain_254), Err(SyntaxError::DomainLength));
    }

    #[test]
    fn tld_length_one_fails() {
        assert_eq!(check_domain("example.c"), Err(SyntaxError::TldLength));
    }

    #[test]
    fn single_label_fails_tld_check() {
        assert_eq!(check_domain("localhost"), Err(SyntaxError::DomainTld));
    }

    #[test]
    fn hyphen_boundaries_rejected() {
        assert_eq!(
            check_domain("-abc.com"),
            Err(SyntaxError::LabelChars)
        );
        assert_eq!(
            check_domain("abc-.com"),
            Err(SyntaxError::LabelChars)
        );
    }
}
