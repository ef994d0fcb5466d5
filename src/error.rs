//! Errors that surface as typed `Result::Err`s to callers: only
//! argument-validation failures. Every other failure mode becomes a
//! classified [`crate::result::ValidationResult`] instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("ports list must not be empty")]
    EmptyPorts,
    #[error("port {0} is not a valid TCP port")]
    InvalidPort(u32),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("max_mx must be greater than zero")]
    ZeroMaxMx,
    #[error("concurrency must be greater than zero")]
    ZeroConcurrency,
}
