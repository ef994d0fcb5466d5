use super::types::SyntaxError;

/// `local-part` grammar: ASCII atext plus `.`, never leading/trailing/
/// doubled, length in `[1, 64]`. Quoted local parts are rejected outright —
/// this crate validates a conservative subset only.
pub(crate) fn check_local(local: &str) -> Result<(), SyntaxError> {
    if local.is_empty() || local.len() > 64 {
        return Err(SyntaxError::LocalLength);
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(SyntaxError::LocalDots);
    }
    if !local.chars().all(is_atext) {
        return Err(SyntaxError::LocalChars);
    }
    Ok(())
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '.'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_local() {
        assert!(check_local("alice").is_ok());
        assert!(check_local("a.b-c_d").is_ok());
    }

    #[test]
    fn boundary_64_ok_65_fails() {
        let exactly_64 = "a".repeat(64);
        assert!(check_local(&exactly_64).is_ok());
        let exactly_65 = "a".repeat(65);
        assert_eq!(check_local(&exactly_65), Err(SyntaxError::LocalLength));
    }

    #[test]
    fn rejects_leading_trailing_and_double_dots() {
        assert_eq!(check_local(".abc"), Err(SyntaxError::LocalDots));
        assert_eq!(check_local("abc."), Err(SyntaxError::LocalDots));
        assert_eq!(check_local("a..b"), Err(SyntaxError::LocalDots));
        assert!(check_local("a.b").is_ok());
    }

    #[test]
    fn rejects_quoted_local_parts() {
        assert_eq!(check_local("\"a b\""), Err(SyntaxError::LocalChars));
    }

    #[test]
    fn rejects_empty_local() {
        assert_eq!(check_local(""), Err(SyntaxError::LocalLength));
    }
}
