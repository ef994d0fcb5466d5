/// A raw SMTP reply: numeric status code plus message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// Codes 550/551/552/553/554 are a *hard negative*.
    pub fn is_hard_negative(&self) -> bool {
        matches!(self.code, 550 | 551 | 552 | 553 | 554)
    }

    pub fn has_capability(&self, cap: &str) -> bool {
        self.message
            .lines()
            .any(|line| line.split_whitespace().next().is_some_and(|tok| tok.eq_ignore_ascii_case(cap)))
    }
}

/// Outcome of probing one host on one port.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    pub accepted: bool,
    pub reply_code: Option<u16>,
    pub reply_text: Option<String>,
    pub connected: bool,
}

impl ProbeOutcome {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn is_hard_negative(&self) -> bool {
        matches!(self.reply_code, Some(550 | 551 | 552 | 553 | 554))
    }
}
