//! SMTP probing: opens a conversation with a candidate host, negotiates
//! EHLO/HELO and opportunistic STARTTLS, and classifies the `RCPT TO`
//! response. Catch-all detection reuses [`probe`] with a random local part.

pub(crate) mod catchall;
mod error;
mod probe;
mod session;
mod types;

pub(crate) use catchall::detect as detect_catch_all;
pub(crate) use probe::probe;
pub use types::ProbeOutcome;
