//! Reports when a server's TLS certificate expires.
//!
//! A check normalizes the target into `host:port`, opens an unverified TLS
//! session, reads `notAfter` from the leaf certificate and prints it together
//! with the number of whole days left.
//!
//! ```no_run
//! use chrono::Utc;
//! use ssl_expiry::{run, Config, OpenSslConnector};
//!
//! let connector = OpenSslConnector::new(Config::default());
//! run("https://example.com", &connector, Utc::now(), &mut std::io::stdout())?;
//! # Ok::<(), ssl_expiry::ExpiryError>(())
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use log::{info, warn};

pub mod certificate;
pub mod config;
pub mod connector;
pub mod error;
pub mod expiry;
pub mod input;
pub mod target;

pub use certificate::certificate_expiry;
pub use config::Config;
pub use connector::{dial_network, NetworkConnector, OpenSslConnector, SecureSession};
pub use error::ExpiryError;
pub use expiry::{calculate_remaining_days, ExpiryReport};
pub use target::format_target;

/// Dials `address`, reads the leaf certificate's expiry and closes the session.
///
/// The session is closed whether or not a certificate was found. A failure
/// to close is logged and otherwise ignored.
pub fn fetch_expiry(
    address: &str,
    connector: &dyn NetworkConnector,
) -> Result<DateTime<Utc>, ExpiryError> {
    let mut session = dial_network(address, connector)?;
    let expiry = certificate_expiry(session.as_ref());
    if let Err(e) = session.close() {
        warn!("failed to close session with {}: {}", address, e);
    }
    expiry
}

/// Checks one target and writes the outcome to `out`.
///
/// Connection and certificate failures are written as `Error: <message>`
/// and are not returned. Only a malformed target (or a failed write) comes
/// back as `Err`.
pub fn run<W: Write>(
    target: &str,
    connector: &dyn NetworkConnector,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<(), ExpiryError> {
    let address = format_target(target)?;
    info!("checking certificate of {}", address);

    match fetch_expiry(&address, connector) {
        Ok(expiry) => ExpiryReport::new(expiry, now).write_to(out)?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(())
}
