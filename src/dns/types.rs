/// One MX record: lower `preference` is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxCandidate {
    pub preference: u16,
    pub host: String,
}

impl MxCandidate {
    pub fn new(preference: u16, host: impl Into<String>) -> Self {
        Self {
            preference,
            host: host.into(),
        }
    }
}

/// Outcome of resolving a domain's mail exchangers.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Ordered, deduplicated, truncated candidate hosts actually eligible
    /// for an SMTP attempt. Synthesized as a single entry equal to the
    /// domain itself when falling back to A/AAAA.
    pub mx_hosts: Vec<MxCandidate>,
    /// True only when the domain had real MX records (not the A/AAAA
    /// fallback synthesized host).
    pub domain_has_mx: bool,
}

impl Resolution {
    /// True when neither MX nor A/AAAA records were found.
    pub fn no_mx_no_a(&self) -> bool {
        self.mx_hosts.is_empty()
    }
}
