//! Wires the syntax/DNS/SMTP/classifier stages into the single-address and
//! batch entry points.

mod batch;
mod cancel;
mod pipeline;

pub use batch::{BatchSummary, ValidationResults, check_many};
pub use pipeline::check;
