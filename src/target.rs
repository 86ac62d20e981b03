//! Target normalization.

use url::{ParseError, Url};

use crate::ExpiryError;

const HTTPS_PORT: u16 = 443;

/// Turns a user supplied target into a `host:port` string for the dialer.
///
/// `https` URLs become `<host>:<port>`, where the port is 443 unless the URL
/// names another one. Path, query and fragment are dropped. Anything without
/// an `https` scheme, including a bare `host:port`, is returned verbatim.
///
/// Inputs the URL parser rejects outright yield
/// [`ExpiryError::MalformedTarget`]; callers treat that as fatal.
///
/// ```
/// # use ssl_expiry::format_target;
/// assert_eq!(format_target("https://example.com/my-test/").unwrap(), "example.com:443");
/// assert_eq!(format_target("http://example.com:80").unwrap(), "http://example.com:80");
/// ```
pub fn format_target(target: &str) -> Result<String, ExpiryError> {
    let parsed = match Url::parse(target) {
        Ok(parsed) => parsed,
        // No scheme at all, e.g. `example.com` or `127.0.0.1:8443`.
        Err(ParseError::RelativeUrlWithoutBase) => return Ok(target.to_string()),
        Err(e) => {
            return Err(ExpiryError::MalformedTarget {
                target: target.to_string(),
                reason: e.to_string(),
            })
        }
    };

    if parsed.scheme() != "https" {
        return Ok(target.to_string());
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ExpiryError::MalformedTarget {
            target: target.to_string(),
            reason: "empty host".to_string(),
        })?;
    let port = parsed.port_or_known_default().unwrap_or(HTTPS_PORT);
    Ok(format!("{}:{}", host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(input: &str) -> String {
        format_target(input).unwrap()
    }

    #[test]
    fn test_https_targets_are_reduced_to_host_and_port() {
        assert_eq!(format("https://example.com"), "example.com:443");
        assert_eq!(format("https://www.example.com/"), "www.example.com:443");
        assert_eq!(format("https://sub.example.com/"), "sub.example.com:443");
        assert_eq!(format("https://example.com/my-test/"), "example.com:443");
        assert_eq!(
            format("https://example.com/a/b?query=1&x=y#fragment"),
            "example.com:443"
        );
    }

    #[test]
    fn test_non_https_targets_are_unchanged() {
        for input in &[
            "http://example.com",
            "http://example.com:80",
            "http://sub.example.com/",
            "http://example.com/my-test/",
            "example.com:443",
            "example.com",
            "127.0.0.1:8443",
            "[::1]:443",
            "ftp://example.com/file",
        ] {
            assert_eq!(&format(input), input);
        }
    }

    #[test]
    fn test_https_scheme_is_case_insensitive() {
        assert_eq!(format("HTTPS://Example.com/"), "example.com:443");
    }

    #[test]
    fn test_explicit_https_port_is_kept() {
        assert_eq!(format("https://example.com:8443/health"), "example.com:8443");
        assert_eq!(format("https://example.com:443/"), "example.com:443");
    }

    #[test]
    fn test_ipv6_host_keeps_brackets() {
        assert_eq!(format("https://[::1]/"), "[::1]:443");
    }

    #[test]
    fn test_unparseable_targets_are_malformed() {
        for input in &["https://", "https://exa mple.com", "https://example.com:99999"] {
            match format_target(input) {
                Err(ExpiryError::MalformedTarget { target, .. }) => assert_eq!(&target, input),
                other => panic!("Expected MalformedTarget for {}, got {:?}", input, other),
            }
        }
    }
}
