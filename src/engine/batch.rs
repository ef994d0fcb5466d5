use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, bounded, unbounded};

use crate::error::CheckError;
use crate::options::CheckOptions;
use crate::result::{Status, ValidationResult};

use super::cancel::CancellationToken;
use super::pipeline::check_with_cancel;

/// Per-status counters plus the full result list. `invalid_syntax`
/// and `invalid_domain` both fold into `invalid`.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub deliverable: usize,
    pub undeliverable: usize,
    pub unknown: usize,
    pub invalid: usize,
    pub results: Vec<ValidationResult>,
}

impl BatchSummary {
    fn push(&mut self, result: ValidationResult) {
        match result.status {
            Status::Deliverable => self.deliverable += 1,
            Status::Undeliverable => self.undeliverable += 1,
            Status::Unknown => self.unknown += 1,
            Status::InvalidSyntax | Status::InvalidDomain => self.invalid += 1,
        }
        self.results.push(result);
    }
}

/// A lazy, per-completion stream of results from [`check_many`]. Dropping it
/// before exhaustion cancels the batch: the work queue stops being drained
/// and in-flight workers stop at the next host/port checkpoint.
#[derive(Debug)]
pub struct ValidationResults {
    receiver: Option<Receiver<ValidationResult>>,
    handles: Vec<JoinHandle<()>>,
}

impl Iterator for ValidationResults {
    type Item = ValidationResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl ValidationResults {
    /// Consumes the stream into a terminal summary.
    pub fn collect_summary(self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for result in self {
            summary.push(result);
        }
        summary
    }
}

impl Drop for ValidationResults {
    fn drop(&mut self) {
        // Drop the receiver first so workers observe a disconnected send and
        // stop dispatching new hosts/ports, then wait for them to unwind.
        self.receiver.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Runs [`check_with_cancel`] over `emails` with at most `concurrency`
/// pipelines in flight. Results are emitted in completion order, not input
/// order.
pub fn check_many(
    emails: impl IntoIterator<Item = String>,
    options: &CheckOptions,
    concurrency: usize,
) -> Result<ValidationResults, CheckError> {
    let span = tracing::info_span!("check_many", concurrency);
    let _enter = span.enter();

    options.validate()?;
    if concurrency == 0 {
        return Err(CheckError::ZeroConcurrency);
    }

    let (work_tx, work_rx) = unbounded::<String>();
    let mut queued = 0usize;
    for email in emails {
        // Can only fail if every receiver were already dropped, which never
        // happens before this loop returns.
        let _ = work_tx.send(email);
        queued += 1;
    }
    drop(work_tx);
    tracing::debug!(queued, "queued batch for processing");

    let (result_tx, result_rx) = bounded::<ValidationResult>(concurrency.saturating_mul(2).max(1));
    let cancel = CancellationToken::new();

    let mut handles = Vec::with_capacity(concurrency);
    for _ in 0..concurrency {
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let cancel = cancel.clone();
        let options = options.clone();
        handles.push(std::thread::spawn(move || {
            worker_loop(&work_rx, &result_tx, &cancel, &options);
        }));
    }
    drop(result_tx);

    Ok(ValidationResults {
        receiver: Some(result_rx),
        handles,
    })
}

fn worker_loop(
    work_rx: &crossbeam_channel::Receiver<String>,
    result_tx: &crossbeam_channel::Sender<ValidationResult>,
    cancel: &CancellationToken,
    options: &CheckOptions,
) {
    while let Ok(email) = work_rx.recv() {
        if cancel.is_cancelled() {
            break;
        }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            check_with_cancel(&email, options, cancel)
        }))
        .unwrap_or_else(|_| {
            tracing::warn!(email = email.as_str(), "worker panicked mid-pipeline");
            ValidationResult::panicked(&email)
        });
        if result_tx.send(result).is_err() {
            cancel.cancel();
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_partitions_invalid_syntax_as_invalid() {
        let options = CheckOptions::default();
        let emails = vec!["bad..dots@example.com".to_string(), "no-at-sign".to_string()];
        let summary = check_many(emails, &options, 2).unwrap().collect_summary();
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.results.len(), 2);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let options = CheckOptions::default();
        let err = check_many(Vec::new(), &options, 0).unwrap_err();
        assert_eq!(err, CheckError::ZeroConcurrency);
    }

    #[test]
    fn invalid_options_reject_before_spawning_workers() {
        let mut options = CheckOptions::default();
        options.ports.clear();
        let err = check_many(Vec::new(), &options, 2).unwrap_err();
        assert_eq!(err, CheckError::EmptyPorts);
    }
}
