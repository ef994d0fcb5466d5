//! Pure classifier: combines accumulated evidence into a final
//! `(Status, reason)` pair. No I/O, fully unit-testable.

use crate::result::{Status, Tri};

/// Evidence accumulated by the engine for one address, prior to
/// classification. `has_any_host` distinguishes "no MX and no A/AAAA" from
/// "resolved to a host but it never answered".
#[derive(Debug, Clone)]
pub(crate) struct Evidence {
    pub has_any_host: bool,
    pub smtp_connectable: bool,
    pub is_deliverable: Tri,
    pub is_catch_all: Tri,
    pub last_reply_code: Option<u16>,
}

pub(crate) fn classify(evidence: &Evidence) -> (Status, Option<String>) {
    if !evidence.has_any_host {
        return (Status::InvalidDomain, Some("no_mx_no_a".to_string()));
    }

    if !evidence.smtp_connectable && evidence.is_deliverable == Tri::Unknown {
        return (Status::Unknown, Some("smtp_unreachable".to_string()));
    }

    if evidence.is_deliverable.is_yes() && evidence.is_catch_all.is_yes() {
        return (Status::Unknown, Some("accepts_all".to_string()));
    }

    if evidence.is_deliverable.is_yes() && evidence.is_catch_all == Tri::Unknown {
        return (Status::Unknown, Some("catch_all_unknown".to_string()));
    }

    if evidence.is_deliverable.is_yes() {
        return (Status::Deliverable, None);
    }

    if evidence.is_deliverable.is_no() {
        let reason = match evidence.last_reply_code {
            Some(code) => format!("rcpt_{code}"),
            None => "hard_fail".to_string(),
        };
        return (Status::Undeliverable, Some(reason));
    }

    let reason = match evidence.last_reply_code {
        Some(code) => format!("rcpt_{code}"),
        None => "temp_fail".to_string(),
    };
    (Status::Unknown, Some(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Evidence {
        Evidence {
            has_any_host: true,
            smtp_connectable: true,
            is_deliverable: Tri::Unknown,
            is_catch_all: Tri::Unknown,
            last_reply_code: None,
        }
    }

    #[test]
    fn no_host_is_invalid_domain() {
        let mut e = base();
        e.has_any_host = false;
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::InvalidDomain);
        assert_eq!(reason.as_deref(), Some("no_mx_no_a"));
    }

    #[test]
    fn unreachable_is_unknown_smtp_unreachable() {
        let mut e = base();
        e.smtp_connectable = false;
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Unknown);
        assert_eq!(reason.as_deref(), Some("smtp_unreachable"));
    }

    #[test]
    fn deliverable_and_catch_all_is_unknown_accepts_all() {
        let mut e = base();
        e.is_deliverable = Tri::Yes;
        e.is_catch_all = Tri::Yes;
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Unknown);
        assert_eq!(reason.as_deref(), Some("accepts_all"));
    }

    #[test]
    fn deliverable_with_unresolved_catch_all_is_unknown() {
        let mut e = base();
        e.is_deliverable = Tri::Yes;
        e.is_catch_all = Tri::Unknown;
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Unknown);
        assert_eq!(reason.as_deref(), Some("catch_all_unknown"));
    }

    #[test]
    fn deliverable_alone_is_deliverable() {
        let mut e = base();
        e.is_deliverable = Tri::Yes;
        e.is_catch_all = Tri::No;
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Deliverable);
        assert!(reason.is_none());
    }

    #[test]
    fn hard_negative_is_undeliverable_with_rcpt_code() {
        let mut e = base();
        e.is_deliverable = Tri::No;
        e.last_reply_code = Some(550);
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Undeliverable);
        assert_eq!(reason.as_deref(), Some("rcpt_550"));
    }

    #[test]
    fn soft_failure_is_unknown_with_temp_fail() {
        let e = base();
        let (status, reason) = classify(&e);
        assert_eq!(status, Status::Unknown);
        assert_eq!(reason.as_deref(), Some("temp_fail"));
    }
}
