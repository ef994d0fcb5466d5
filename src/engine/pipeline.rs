use std::time::Instant;

use crate::classify::{Evidence, classify};
use crate::disposable;
use crate::dns;
use crate::options::CheckOptions;
use crate::result::{Tri, ValidationResult};
use crate::smtp;

use super::cancel::CancellationToken;

/// Single-address pipeline: normalize, resolve, probe, detect catch-all,
/// classify. Never panics on network failure — every failure mode becomes
/// part of the returned [`ValidationResult`].
pub fn check(email: &str, options: &CheckOptions) -> ValidationResult {
    check_with_cancel(email, options, &CancellationToken::new())
}

pub(crate) fn check_with_cancel(
    email: &str,
    options: &CheckOptions,
    cancel: &CancellationToken,
) -> ValidationResult {
    let span = tracing::info_span!("check", email);
    let _enter = span.enter();

    let address = match crate::address::normalize(email) {
        Ok(address) => address,
        Err(err) => {
            return ValidationResult::invalid_syntax(email, err.code(), Vec::new());
        }
    };

    let mut logs = Vec::new();
    let is_disposable = Tri::from_bool(disposable::is_disposable(
        &address.ascii_domain,
        &options.extra_disposable_domains,
    ));

    let resolution = dns::resolve(&address.ascii_domain, options.max_mx);
    if resolution.no_mx_no_a() {
        tracing::debug!(domain = %address.ascii_domain, "no MX or A/AAAA records");
        let (status, reason) = classify(&Evidence {
            has_any_host: false,
            smtp_connectable: false,
            is_deliverable: Tri::Unknown,
            is_catch_all: Tri::Unknown,
            last_reply_code: None,
        });
        return ValidationResult {
            email: email.to_string(),
            normalized_email: Some(address.normalized()),
            domain: Some(address.ascii_domain),
            is_valid_syntax: true,
            domain_has_mx: false,
            smtp_connectable: false,
            is_deliverable: Tri::Unknown,
            is_catch_all: Tri::Unknown,
            is_disposable,
            status,
            reason,
            mx_hosts: Vec::new(),
            logs,
        };
    }

    let hosts: Vec<String> = resolution.mx_hosts.iter().map(|c| c.host.clone()).collect();
    let rcpt_to = address.normalized();

    // A soft overall ceiling on top of the per-operation timeouts, sized for
    // the pathological case of every host and port timing out in turn.
    let deadline = Instant::now()
        + options.timeout
            * (options.ports.len() as u32).max(1)
            * (options.max_mx as u32).max(1)
            * 2;

    let mut smtp_connectable = false;
    let mut is_deliverable = Tri::Unknown;
    let mut last_reply_code = None;
    let mut attempted_hosts = Vec::new();

    for host in &hosts {
        if cancel.is_cancelled() || Instant::now() >= deadline {
            tracing::debug!(host = host.as_str(), "skipping remaining hosts: cancelled or deadline exceeded");
            break;
        }
        attempted_hosts.push(host.clone());
        let outcome = smtp::probe(
            host,
            &options.ports,
            &options.from_address,
            &rcpt_to,
            &options.helo_host,
            options.timeout,
            &mut logs,
        );
        smtp_connectable |= outcome.connected;

        if let Some(code) = outcome.reply_code {
            last_reply_code = Some(code);
        }

        if outcome.accepted {
            is_deliverable = Tri::Yes;
            break;
        }
        if outcome.is_hard_negative() {
            is_deliverable = Tri::No;
        }
    }

    let is_catch_all = if is_deliverable.is_yes() && !cancel.is_cancelled() && Instant::now() < deadline {
        let accepted = smtp::detect_catch_all(
            &attempted_hosts,
            &options.from_address,
            &address.ascii_domain,
            &options.helo_host,
            &options.ports,
            options.timeout,
            &mut logs,
        );
        Tri::from_bool(accepted)
    } else {
        Tri::Unknown
    };

    let (status, reason) = classify(&Evidence {
        has_any_host: true,
        smtp_connectable,
        is_deliverable,
        is_catch_all,
        last_reply_code,
    });

    ValidationResult {
        email: email.to_string(),
        normalized_email: Some(address.normalized()),
        domain: Some(address.ascii_domain),
        is_valid_syntax: true,
        domain_has_mx: resolution.domain_has_mx,
        smtp_connectable,
        is_deliverable,
        is_catch_all,
        is_disposable,
        status,
        reason,
        mx_hosts: attempted_hosts,
        logs: if options.verbose { logs } else { Vec::new() },
    }
}
