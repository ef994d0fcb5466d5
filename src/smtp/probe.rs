use std::time::Duration;

use super::error::ProbeError;
use super::session::SmtpSession;
use super::types::{ProbeOutcome, SmtpReply};

fn log_line(logs: &mut Vec<String>, message: impl std::fmt::Display) {
    let ts = chrono::Local::now().format("%H:%M:%S");
    logs.push(format!("[{ts}] {message}"));
}

fn send_and_read(
    session: &mut SmtpSession,
    command: &str,
    logs: &mut Vec<String>,
) -> Result<SmtpReply, ProbeError> {
    log_line(logs, format_args!("-> {command}"));
    session.send_command(command)?;
    let reply = session.read_reply()?;
    log_line(logs, format_args!("<- {} {}", reply.code, reply.message));
    Ok(reply)
}

/// Speaks the SMTP probing state machine against one host, trying `ports`
/// in order. Connect/banner/NOOP failures move on to the next port; once a
/// conversation is established, the remaining steps report their outcome
/// (possibly a soft failure) rather than retrying another port.
pub(crate) fn probe(
    host: &str,
    ports: &[u16],
    mail_from: &str,
    rcpt_to: &str,
    helo_host: &str,
    timeout: Duration,
    logs: &mut Vec<String>,
) -> ProbeOutcome {
    for &port in ports {
        match run_port(host, port, mail_from, rcpt_to, helo_host, timeout, logs) {
            Ok(outcome) => return outcome,
            Err(err) => {
                tracing::debug!(host, port, %err, "port unreachable, trying next");
                log_line(logs, format_args!("{host}:{port} unreachable: {err}"));
            }
        }
    }
    tracing::warn!(host, "no port accepted a connection");
    ProbeOutcome::unreachable()
}

fn run_port(
    host: &str,
    port: u16,
    mail_from: &str,
    rcpt_to: &str,
    helo_host: &str,
    timeout: Duration,
    logs: &mut Vec<String>,
) -> Result<ProbeOutcome, ProbeError> {
    let mut session = SmtpSession::connect(host, port, timeout, timeout)?;
    tracing::debug!(host, port, peer = %session.peer_addr(), "connected");
    log_line(logs, format_args!("connected to {host}:{port} ({})", session.peer_addr()));
    let banner = session.read_reply()?;
    log_line(logs, format_args!("<- {} {}", banner.code, banner.message));

    send_and_read(&mut session, "NOOP", logs)?;

    // Past this point the port is "connected": further failures become a
    // soft outcome rather than a reason to try the next port.
    let outcome = converse(&mut session, mail_from, rcpt_to, helo_host, host, timeout, logs);
    session.send_command("RSET").ok();
    session.send_command("QUIT").ok();
    Ok(outcome)
}

fn converse(
    session: &mut SmtpSession,
    mail_from: &str,
    rcpt_to: &str,
    helo_host: &str,
    host: &str,
    timeout: Duration,
    logs: &mut Vec<String>,
) -> ProbeOutcome {
    let ehlo = match send_and_read(session, &format!("EHLO {helo_host}"), logs) {
        Ok(reply) if reply.is_positive_completion() => reply,
        _ => match send_and_read(session, &format!("HELO {helo_host}"), logs) {
            Ok(reply) => reply,
            Err(err) => {
                log_line(logs, format_args!("HELO failed: {err}"));
                SmtpReply {
                    code: 0,
                    message: String::new(),
                }
            }
        },
    };

    if ehlo.has_capability("STARTTLS") {
        match send_and_read(session, "STARTTLS", logs) {
            Ok(reply) if reply.is_positive_completion() => {
                match session.upgrade_tls(host, timeout) {
                    Ok(()) => {
                        tracing::debug!(host, "TLS handshake complete");
                        log_line(logs, "TLS handshake complete");
                        let _ = send_and_read(session, &format!("EHLO {helo_host}"), logs);
                    }
                    Err(err) => {
                        tracing::warn!(host, %err, "TLS handshake failed, continuing in plaintext");
                        log_line(logs, format_args!("TLS handshake failed, continuing in plaintext: {err}"));
                    }
                }
            }
            Ok(reply) => {
                log_line(logs, format_args!("STARTTLS rejected with {}", reply.code));
            }
            Err(err) => {
                log_line(logs, format_args!("STARTTLS failed: {err}"));
            }
        }
    }

    let mail_cmd = if mail_from.is_empty() {
        "MAIL FROM:<>".to_string()
    } else {
        format!("MAIL FROM:<{mail_from}>")
    };
    if let Err(err) = send_and_read(session, &mail_cmd, logs) {
        log_line(logs, format_args!("MAIL FROM failed: {err}"));
        return ProbeOutcome {
            accepted: false,
            reply_code: None,
            reply_text: None,
            connected: true,
        };
    }

    let rcpt_cmd = format!("RCPT TO:<{rcpt_to}>");
    match send_and_read(session, &rcpt_cmd, logs) {
        Ok(reply) => {
            tracing::debug!(host, code = reply.code, accepted = reply.is_positive_completion(), "RCPT reply");
            ProbeOutcome {
                accepted: reply.is_positive_completion(),
                reply_code: Some(reply.code),
                reply_text: Some(reply.message),
                connected: true,
            }
        }
        Err(err) => {
            tracing::warn!(host, %err, "RCPT TO failed");
            log_line(logs, format_args!("RCPT TO failed: {err}"));
            ProbeOutcome {
                accepted: false,
                reply_code: None,
                reply_text: None,
                connected: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Spawns a loopback SMTP stub that scripts replies by command prefix.
    fn spawn_mock_server(rcpt_code: &'static str) -> (String, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut writer = stream.try_clone().unwrap();
                let mut reader = BufReader::new(stream);
                writer.write_all(b"220 mock.example.com ESMTP\r\n").unwrap();
                let mut line = String::new();
                loop {
                    line.clear();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 {
                        break;
                    }
                    let upper = line.to_ascii_uppercase();
                    let reply = if upper.starts_with("EHLO") {
                        "250-mock.example.com\r\n250 OK\r\n".to_string()
                    } else if upper.starts_with("HELO") {
                        "250 mock.example.com\r\n".to_string()
                    } else if upper.starts_with("NOOP") {
                        "250 OK\r\n".to_string()
                    } else if upper.starts_with("MAIL FROM") {
                        "250 OK\r\n".to_string()
                    } else if upper.starts_with("RCPT TO") {
                        format!("{rcpt_code}\r\n")
                    } else if upper.starts_with("QUIT") {
                        writer.write_all(b"221 bye\r\n").ok();
                        break;
                    } else {
                        "250 OK\r\n".to_string()
                    };
                    if writer.write_all(reply.as_bytes()).is_err() {
                        break;
                    }
                }
            }
        });
        (addr.ip().to_string(), addr.port())
    }

    #[test]
    fn accepted_rcpt_marks_accepted() {
        let (host, port) = spawn_mock_server("250 2.1.5 OK");
        let mut logs = Vec::new();
        let outcome = probe(
            &host,
            &[port],
            "verify@example.com",
            "user@example.com",
            "example.com",
            Duration::from_secs(2),
            &mut logs,
        );
        assert!(outcome.accepted);
        assert!(outcome.connected);
        assert_eq!(outcome.reply_code, Some(250));
        assert!(!logs.is_empty());
    }

    #[test]
    fn hard_negative_rcpt_is_not_accepted() {
        let (host, port) = spawn_mock_server("550 5.1.1 No such user");
        let mut logs = Vec::new();
        let outcome = probe(
            &host,
            &[port],
            "verify@example.com",
            "ghost@example.com",
            "example.com",
            Duration::from_secs(2),
            &mut logs,
        );
        assert!(!outcome.accepted);
        assert!(outcome.connected);
        assert!(outcome.is_hard_negative());
    }

    #[test]
    fn unreachable_host_reports_not_connected() {
        let mut logs = Vec::new();
        let outcome = probe(
            "127.0.0.1",
            &[1],
            "verify@example.com",
            "user@example.com",
            "example.com",
            Duration::from_millis(200),
            &mut logs,
        );
        assert!(!outcome.connected);
        assert!(!outcome.accepted);
    }
}
