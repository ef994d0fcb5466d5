use thiserror::Error;

/// Transport/protocol failures internal to one connection attempt. These
/// never escape the engine — [`super::probe::probe`] catches every variant,
/// appends it to the trace log, and moves on to the next port/host.
#[derive(Debug, Error)]
pub(crate) enum ProbeError {
    #[error("connect to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("TLS handshake failed: {source}")]
    Tls {
        #[source]
        source: native_tls::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<std::io::Error> for ProbeError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
