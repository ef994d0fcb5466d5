use std::time::Duration;

use rand::Rng;
use rand::distributions::Alphanumeric;

use super::probe::probe;
use super::types::ProbeOutcome;

/// `probe_` + 20 random lowercase alphanumerics.
pub(crate) fn random_local_part() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("probe_{suffix}")
}

/// Runs the catch-all probe against the same candidate hosts used for the
/// real address. Only called when the real RCPT was accepted.
pub(crate) fn detect(
    hosts: &[String],
    mail_from: &str,
    domain: &str,
    helo_host: &str,
    ports: &[u16],
    timeout: Duration,
    logs: &mut Vec<String>,
) -> bool {
    let rcpt_to = format!("{}@{}", random_local_part(), domain);
    tracing::debug!(domain, "probing for catch-all acceptance");
    for host in hosts {
        let outcome = probe(host, ports, mail_from, &rcpt_to, helo_host, timeout, logs);
        if outcome.accepted {
            tracing::debug!(domain, host = host.as_str(), "domain accepts all recipients");
            return true;
        }
        if outcome.is_hard_negative() {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_local_part_has_expected_shape() {
        let local = random_local_part();
        assert!(local.starts_with("probe_"));
        assert_eq!(local.len(), "probe_".len() + 20);
        assert!(local["probe_".len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn random_local_part_is_not_constant() {
        let a = random_local_part();
        let b = random_local_part();
        assert_ne!(a, b);
    }
}
