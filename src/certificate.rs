//! Reading the expiry date of the peer's leaf certificate.

use chrono::{DateTime, Utc};
use openssl::asn1::{Asn1Time, Asn1TimeRef};

use crate::connector::SecureSession;
use crate::ExpiryError;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Returns the `notAfter` date of the first certificate the peer presented.
///
/// Only the leaf is looked at; intermediates and roots are ignored.
pub fn certificate_expiry(session: &dyn SecureSession) -> Result<DateTime<Utc>, ExpiryError> {
    let certificates = session.peer_certificates();
    let leaf = certificates.first().ok_or(ExpiryError::NoCertificate)?;
    asn1_to_datetime(leaf.not_after())
}

/// Converts an ASN.1 time into UTC by measuring its distance from the epoch.
pub fn asn1_to_datetime(time: &Asn1TimeRef) -> Result<DateTime<Utc>, ExpiryError> {
    let epoch = Asn1Time::from_unix(0)?;
    let diff = epoch.diff(time)?;
    let seconds = i64::from(diff.days) * SECONDS_PER_DAY + i64::from(diff.secs);
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| ExpiryError::CertificateError {
        reason: format!("notAfter {} is out of range", time),
    })
}
