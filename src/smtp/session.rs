use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{HandshakeError, TlsConnector, TlsStream};

use super::error::ProbeError;
use super::types::SmtpReply;

#[derive(Debug)]
enum Stream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
    Swapping,
}

/// A single SMTP connection, plaintext or opportunistically upgraded to
/// TLS. Owns its socket and closes it when dropped on every path, including
/// error paths.
pub(crate) struct SmtpSession {
    stream: Stream,
    buffer: Vec<u8>,
    peer: SocketAddr,
}

fn resolve_socket_addrs(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    (host, port).to_socket_addrs().map(Iterator::collect)
}

impl SmtpSession {
    pub(crate) fn connect(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        io_timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let addrs = resolve_socket_addrs(host, port)?;
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(io_timeout))?;
                    stream.set_write_timeout(Some(io_timeout))?;
                    tracing::debug!(host, port, %addr, "tcp connect succeeded");
                    return Ok(Self {
                        stream: Stream::Plain(stream),
                        buffer: Vec::new(),
                        peer: addr,
                    });
                }
                Err(err) => {
                    tracing::debug!(host, port, %addr, %err, "tcp connect attempt failed");
                    last_err = Some(err);
                }
            }
        }
        Err(ProbeError::Connect {
            host: host.to_string(),
            source: last_err
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses")),
        })
    }

    pub(crate) fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub(crate) fn send_command(&mut self, command: &str) -> Result<(), ProbeError> {
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.write_all(&data)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), ProbeError> {
        match &mut self.stream {
            Stream::Plain(s) => {
                s.write_all(data)?;
                s.flush()?;
            }
            Stream::Tls(s) => {
                s.write_all(data)?;
                s.flush()?;
            }
            Stream::Swapping => {
                return Err(ProbeError::Protocol("stream mid-upgrade".to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut code: Option<u16> = None;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line.len() < 3 {
                return Err(ProbeError::Protocol(format!("invalid reply: '{line}'")));
            }
            let parsed = line[..3]
                .parse::<u16>()
                .map_err(|_| ProbeError::Protocol(format!("invalid status code: '{line}'")))?;
            code.get_or_insert(parsed);
            let is_last = line.as_bytes().get(3) != Some(&b'-');
            let text = if line.len() > 4 { &line[4..] } else { "" };
            lines.push(text.to_string());
            if is_last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.unwrap_or(0),
            message: lines.join("\n"),
        })
    }

    fn read_line(&mut self) -> Result<String, ProbeError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let mut raw: Vec<u8> = self.buffer.drain(..=pos).collect();
                if raw.ends_with(b"\r\n") {
                    raw.truncate(raw.len() - 2);
                } else if raw.ends_with(b"\n") {
                    raw.truncate(raw.len() - 1);
                }
                return String::from_utf8(raw)
                    .map_err(|e| ProbeError::Protocol(format!("utf8 error: {e}")));
            }
            let mut buf = [0u8; 512];
            let read = match &mut self.stream {
                Stream::Plain(s) => s.read(&mut buf)?,
                Stream::Tls(s) => s.read(&mut buf)?,
                Stream::Swapping => {
                    return Err(ProbeError::Protocol("stream mid-upgrade".to_string()));
                }
            };
            if read == 0 {
                return Err(ProbeError::Io {
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"),
                });
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }

    /// Opportunistic STARTTLS. A handshake failure is reported to the
    /// caller, which logs and continues on the plaintext stream rather than
    /// treating it as fatal — the plain socket is always left usable on
    /// every error path.
    pub(crate) fn upgrade_tls(&mut self, domain: &str, timeout: Duration) -> Result<(), ProbeError> {
        let mut swap = Stream::Swapping;
        std::mem::swap(&mut self.stream, &mut swap);
        let plain = match swap {
            Stream::Plain(s) => s,
            other => {
                self.stream = other;
                return Ok(());
            }
        };

        let fallback = plain.try_clone()?;

        let connector = match TlsConnector::new() {
            Ok(connector) => connector,
            Err(source) => {
                self.stream = Stream::Plain(fallback);
                return Err(ProbeError::Tls { source });
            }
        };
        let tls = match connector.connect(domain, plain) {
            Ok(tls) => tls,
            Err(HandshakeError::Failure(source)) => {
                self.stream = Stream::Plain(fallback);
                return Err(ProbeError::Tls { source });
            }
            Err(HandshakeError::WouldBlock(mut mid)) => loop {
                match mid.handshake() {
                    Ok(tls) => break tls,
                    Err(HandshakeError::Failure(source)) => {
                        self.stream = Stream::Plain(fallback);
                        return Err(ProbeError::Tls { source });
                    }
                    Err(HandshakeError::WouldBlock(next)) => mid = next,
                }
            },
        };
        tls.get_ref().set_read_timeout(Some(timeout))?;
        tls.get_ref().set_write_timeout(Some(timeout))?;
        self.stream = Stream::Tls(Box::new(tls));
        Ok(())
    }
}
