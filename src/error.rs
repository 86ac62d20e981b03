//! Error types for certificate expiry checks.
//!
//! This module defines the errors that can occur while normalizing a target,
//! connecting to it and reading the expiry date of its certificate.

use std::fmt;
use std::io;

/// Error type for certificate expiry checks.
///
/// Every variant except [`ExpiryError::MalformedTarget`] is reported to the
/// user as a single `Error: <message>` line. A malformed target aborts the
/// process instead.
#[derive(Debug)]
pub enum ExpiryError {
    /// The target could not be parsed as a URL
    MalformedTarget {
        /// The target as given by the user
        target: String,
        /// Why the URL parser rejected it
        reason: String,
    },

    /// Invalid input provided to the connector
    InvalidInput {
        /// Which field/parameter was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },

    /// DNS resolution failed for the given address
    DnsResolution {
        /// The address (host:port) that failed to resolve
        address: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// TCP connection failed to the target address
    ConnectionFailed {
        /// The address (host:port) that connection failed to
        address: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The dial did not complete within the configured timeout
    Timeout {
        /// Description of which operation timed out
        operation: String,
    },

    /// TLS handshake failed
    HandshakeFailed {
        /// Details about why the handshake failed
        details: String,
    },

    /// The peer presented no certificate
    NoCertificate,

    /// The certificate could not be interpreted
    CertificateError {
        /// Description of what went wrong
        reason: String,
    },

    /// OpenSSL error occurred
    OpenSSLError {
        /// The underlying OpenSSL error
        details: String,
    },

    /// Generic I/O error
    IoError {
        /// The underlying I/O error
        source: io::Error,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTarget { target, reason } => {
                write!(f, "malformed target {:?}: {}", target, reason)
            }
            Self::InvalidInput { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::DnsResolution { address, source } => {
                write!(f, "dial tcp: lookup {}: {}", address, source)
            }
            Self::ConnectionFailed { address, source } => {
                write!(f, "dial tcp {}: {}", address, source)
            }
            Self::Timeout { operation } => {
                write!(f, "{}: i/o timeout", operation)
            }
            Self::HandshakeFailed { details } => {
                write!(f, "tls handshake failed: {}", details)
            }
            Self::NoCertificate => write!(f, "no certificate found"),
            Self::CertificateError { reason } => {
                write!(f, "certificate error: {}", reason)
            }
            Self::OpenSSLError { details } => {
                write!(f, "openssl error: {}", details)
            }
            Self::IoError { source } => {
                write!(f, "i/o error: {}", source)
            }
        }
    }
}

impl std::error::Error for ExpiryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DnsResolution { source, .. } => Some(source),
            Self::ConnectionFailed { source, .. } => Some(source),
            Self::IoError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for ExpiryError {
    fn from(e: io::Error) -> Self {
        Self::IoError { source: e }
    }
}

impl From<openssl::error::ErrorStack> for ExpiryError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::OpenSSLError {
            details: e.to_string(),
        }
    }
}

impl From<openssl::ssl::Error> for ExpiryError {
    fn from(e: openssl::ssl::Error) -> Self {
        Self::OpenSSLError {
            details: e.to_string(),
        }
    }
}

impl<S: fmt::Debug> From<openssl::ssl::HandshakeError<S>> for ExpiryError {
    fn from(e: openssl::ssl::HandshakeError<S>) -> Self {
        Self::HandshakeFailed {
            details: format!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_certificate_display() {
        assert_eq!(ExpiryError::NoCertificate.to_string(), "no certificate found");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = ExpiryError::InvalidInput {
            field: "address".to_string(),
            reason: "missing port in address".to_string(),
        };
        assert_eq!(err.to_string(), "invalid address: missing port in address");
    }

    #[test]
    fn test_connection_failed_keeps_source() {
        let err = ExpiryError::ConnectionFailed {
            address: "127.0.0.1:1".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        assert!(err.to_string().starts_with("dial tcp 127.0.0.1:1"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_from_handshake_failure() {
        let failure = openssl::ssl::HandshakeError::<std::net::TcpStream>::SetupFailure(
            openssl::error::ErrorStack::get(),
        );
        let err: ExpiryError = failure.into();
        assert!(matches!(err, ExpiryError::HandshakeFailed { .. }));
        assert!(err.to_string().starts_with("tls handshake failed: "));
    }

    #[test]
    fn test_error_from_io() {
        let err: ExpiryError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        match err {
            ExpiryError::IoError { source } => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("Expected IoError, got {:?}", other),
        }
    }
}
