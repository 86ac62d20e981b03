//! Connector configuration.
//!
//! The tool takes no flags and reads no configuration files, so the only
//! source of settings is [`Config::default`]. Tests shorten the timeout with
//! [`Config::with_timeout`].

use std::time::Duration;

/// Dial timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`OpenSslConnector`](crate::connector::OpenSslConnector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bound on the TCP connect, applied again to socket reads and writes
    /// so the TLS handshake cannot block past it either.
    pub timeout: Duration,
}

impl Config {
    /// Returns this configuration with a different dial timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
