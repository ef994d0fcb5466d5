#![forbid(unsafe_code)]
//! mailprobe — email deliverability probing (syntax, MX, SMTP RCPT, catch-all).
//!
//! The entry points are [`check`] for a single address and [`check_many`] for a
//! bounded-concurrency batch. Neither sends a real message: both stop the SMTP
//! conversation after `RCPT TO`.

pub mod address;
pub mod classify;
pub mod disposable;
pub mod dns;
pub mod engine;
pub mod error;
pub mod options;
pub mod result;
pub mod smtp;

pub use address::{Address, SyntaxError};
pub use dns::{MxCandidate, Resolution};
pub use engine::{BatchSummary, ValidationResults, check, check_many};
pub use error::CheckError;
pub use options::CheckOptions;
pub use result::{Status, Tri, ValidationResult};
pub use smtp::ProbeOutcome;
