use thiserror::Error;

/// A normalized email address, immutable after construction by [`super::normalize`].
#[cfg_attr(test, derive(Clone))]
#[derive(Debug, PartialEq, Eq)]
pub struct Address {
    pub original: String,
    pub local: String,
    pub domain: String,
    pub ascii_domain: String,
}

impl Address {
    pub fn normalized(&self) -> String {
        format!("{}@{}", self.local, self.ascii_domain)
    }
}

/// A stable, machine-readable reason an address failed syntax validation.
///
/// The `Display` impl (via `thiserror`) is the wire value used as `reason` in
/// [`crate::result::ValidationResult`] — keep these tokens stable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("missing_at")]
    MissingAt,
    #[error("domain_idna")]
    DomainIdna,
    #[error("local_length")]
    LocalLength,
    #[error("local_dots")]
    LocalDots,
    #[error("local_chars")]
    LocalChars,
    #[error("domain_length")]
    DomainLength,
    #[error("domain_tld")]
    DomainTld,
    #[error("label_length")]
    LabelLength,
    #[error("label_chars")]
    LabelChars,
    #[error("tld_length")]
    TldLength,
}

impl SyntaxError {
    /// The stable machine code stored verbatim in `ValidationResult::reason`.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingAt => "missing_at",
            Self::DomainIdna => "domain_idna",
            Self::LocalLength => "local_length",
            Self::LocalDots => "local_dots",
            Self::LocalChars => "local_chars",
            Self::DomainLength => "domain_length",
            Self::DomainTld => "domain_tld",
            Self::LabelLength => "label_length",
            Self::LabelChars => "label_chars",
            Self::TldLength => "tld_length",
        }
    }
}
