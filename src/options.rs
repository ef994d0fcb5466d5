//! Engine configuration. Defaults match the documented contract exactly.

use std::time::Duration;

use crate::error::CheckError;

/// Controls how [`crate::check`] and [`crate::check_many`] probe a mailbox.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub from_address: String,
    pub helo_host: String,
    pub timeout: Duration,
    pub max_mx: usize,
    pub ports: Vec<u16>,
    pub verbose: bool,
    /// Extra disposable-domain hostnames merged (case-insensitively) with
    /// the built-in set from [`crate::disposable`].
    pub extra_disposable_domains: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            from_address: "verify@example.com".to_string(),
            helo_host: "example.com".to_string(),
            timeout: Duration::from_secs(7),
            max_mx: 3,
            ports: vec![25],
            verbose: false,
            extra_disposable_domains: Vec::new(),
        }
    }
}

impl CheckOptions {
    /// Validates the knobs that are caller-controlled and can be malformed.
    /// Network-derived failures never go through this path — only
    /// argument-validation errors surface as typed errors.
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.ports.is_empty() {
            return Err(CheckError::EmptyPorts);
        }
        for &port in &self.ports {
            if port == 0 {
                return Err(CheckError::InvalidPort(port as u32));
            }
        }
        if self.timeout.is_zero() {
            return Err(CheckError::ZeroTimeout);
        }
        if self.max_mx == 0 {
            return Err(CheckError::ZeroMaxMx);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_contract() {
        let opts = CheckOptions::default();
        assert_eq!(opts.from_address, "verify@example.com");
        assert_eq!(opts.helo_host, "example.com");
        assert_eq!(opts.timeout, Duration::from_secs(7));
        assert_eq!(opts.max_mx, 3);
        assert_eq!(opts.ports, vec![25]);
        assert!(!opts.verbose);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_empty_ports() {
        let mut opts = CheckOptions::default();
        opts.ports.clear();
        assert_eq!(opts.validate(), Err(CheckError::EmptyPorts));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut opts = CheckOptions::default();
        opts.timeout = Duration::ZERO;
        assert_eq!(opts.validate(), Err(CheckError::ZeroTimeout));
    }
}
