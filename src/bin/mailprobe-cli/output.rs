use anyhow::Result;
use mailprobe::result::CompactResult;
use mailprobe::{Status, ValidationResult};

pub fn print_result(result: &ValidationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else {
        println!("{}", human_line(result));
    }
    Ok(())
}

pub fn human_line(result: &ValidationResult) -> String {
    let compact = CompactResult::from(result);
    let reason = compact.reason.unwrap_or("-");
    format!(
        "{:<12} {:<20} reason={reason}",
        compact.status.to_string(),
        compact.email,
    )
}

/// Exit-code contract: 0 deliverable, 1 invalid/undeliverable, 2 unknown.
pub fn exit_code(status: Status) -> i32 {
    match status {
        Status::Deliverable => 0,
        Status::InvalidSyntax | Status::InvalidDomain | Status::Undeliverable => 1,
        Status::Unknown => 2,
    }
}
