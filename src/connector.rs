//! Opening TLS sessions to a `host:port` target.
//!
//! Dialing is behind the [`NetworkConnector`] trait so the driver never
//! touches sockets directly. [`OpenSslConnector`] is the real implementation;
//! tests substitute their own.
//!
//! [`OpenSslConnector`] does not verify the peer. Chain and hostname checks
//! are switched off because the tool only inspects whatever certificate the
//! server presents, including self-signed and expired ones.

use std::io;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};

use log::debug;
use openssl::ssl::{ErrorCode, HandshakeError, Ssl, SslContext, SslMethod, SslStream, SslVerifyMode};
use openssl::x509::X509;

use crate::config::Config;
use crate::ExpiryError;

/// An established TLS session.
pub trait SecureSession {
    /// Certificates presented by the peer, leaf first.
    fn peer_certificates(&self) -> Vec<X509>;

    /// Ends the session. Called once by the owner before it is dropped.
    fn close(&mut self) -> Result<(), ExpiryError>;
}

/// Capability to open a [`SecureSession`].
pub trait NetworkConnector {
    /// Dials `address` (`host:port`) over `network` and negotiates TLS.
    fn dial(&self, network: &str, address: &str) -> Result<Box<dyn SecureSession>, ExpiryError>;
}

/// Opens a TCP based session to `address` with the given connector.
pub fn dial_network(
    address: &str,
    connector: &dyn NetworkConnector,
) -> Result<Box<dyn SecureSession>, ExpiryError> {
    connector.dial("tcp", address)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Any,
    V4,
    V6,
}

impl Family {
    fn from_network(network: &str) -> Result<Self, ExpiryError> {
        match network {
            "tcp" => Ok(Family::Any),
            "tcp4" => Ok(Family::V4),
            "tcp6" => Ok(Family::V6),
            other => Err(ExpiryError::InvalidInput {
                field: "network".to_string(),
                reason: format!("unsupported network {:?}", other),
            }),
        }
    }

    fn accepts(self, addr: &SocketAddr) -> bool {
        match self {
            Family::Any => true,
            Family::V4 => addr.is_ipv4(),
            Family::V6 => addr.is_ipv6(),
        }
    }
}

/// Dials with a bounded TCP connect followed by an unverified OpenSSL
/// handshake.
#[derive(Debug, Clone, Default)]
pub struct OpenSslConnector {
    config: Config,
}

impl OpenSslConnector {
    pub fn new(config: Config) -> Self {
        OpenSslConnector { config }
    }

    fn resolve(address: &str, family: Family) -> Result<Vec<SocketAddr>, ExpiryError> {
        let addrs: Vec<SocketAddr> = address
            .to_socket_addrs()
            .map_err(|e| ExpiryError::DnsResolution {
                address: address.to_string(),
                source: e,
            })?
            .filter(|addr| family.accepts(addr))
            .collect();

        if addrs.is_empty() {
            return Err(ExpiryError::DnsResolution {
                address: address.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no suitable address found"),
            });
        }
        debug!("{} resolved to {:?}", address, addrs);
        Ok(addrs)
    }

    fn connect(&self, addrs: &[SocketAddr]) -> Result<TcpStream, ExpiryError> {
        let mut last_error = None;
        for addr in addrs {
            debug!("connecting to {} (timeout {:?})", addr, self.config.timeout);
            match TcpStream::connect_timeout(addr, self.config.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    last_error = Some(ExpiryError::Timeout {
                        operation: format!("dial tcp {}", addr),
                    });
                }
                Err(e) => {
                    last_error = Some(ExpiryError::ConnectionFailed {
                        address: addr.to_string(),
                        source: e,
                    });
                }
            }
        }
        Err(last_error.unwrap_or_else(|| ExpiryError::InvalidInput {
            field: "address".to_string(),
            reason: "no address to dial".to_string(),
        }))
    }
}

/// Splits `host:port`, dropping IPv6 brackets from the host.
fn split_host_port(address: &str) -> Result<(&str, u16), ExpiryError> {
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| ExpiryError::InvalidInput {
            field: "address".to_string(),
            reason: format!("missing port in address {:?}", address),
        })?;
    let port = port.parse::<u16>().map_err(|_| ExpiryError::InvalidInput {
        field: "address".to_string(),
        reason: format!("invalid port {:?} in address {:?}", port, address),
    })?;
    Ok((host.trim_start_matches('[').trim_end_matches(']'), port))
}

fn handshake_error(address: &str, e: HandshakeError<TcpStream>) -> ExpiryError {
    match e {
        // Blocking socket: only a read/write timeout interrupts the handshake.
        HandshakeError::WouldBlock(_) => ExpiryError::Timeout {
            operation: format!("tls handshake with {}", address),
        },
        other => other.into(),
    }
}

impl NetworkConnector for OpenSslConnector {
    fn dial(&self, network: &str, address: &str) -> Result<Box<dyn SecureSession>, ExpiryError> {
        let family = Family::from_network(network)?;
        let (host, _port) = split_host_port(address)?;
        let addrs = Self::resolve(address, family)?;

        let tcp_stream = self.connect(&addrs)?;
        tcp_stream.set_read_timeout(Some(self.config.timeout))?;
        tcp_stream.set_write_timeout(Some(self.config.timeout))?;

        let mut context = SslContext::builder(SslMethod::tls())?;
        context.set_verify(SslVerifyMode::NONE);
        let context = context.build();

        let mut ssl = Ssl::new(&context)?;
        if host.parse::<IpAddr>().is_err() {
            ssl.set_hostname(host)?;
        }

        let stream = ssl
            .connect(tcp_stream)
            .map_err(|e| handshake_error(address, e))?;
        debug!(
            "negotiated {} with {} using {}",
            stream.ssl().version_str(),
            address,
            stream
                .ssl()
                .current_cipher()
                .map(|cipher| cipher.name())
                .unwrap_or("unknown cipher")
        );
        Ok(Box::new(stream))
    }
}

impl SecureSession for SslStream<TcpStream> {
    fn peer_certificates(&self) -> Vec<X509> {
        let ssl = self.ssl();
        match ssl.peer_cert_chain() {
            Some(chain) if !chain.is_empty() => chain.iter().map(|cert| cert.to_owned()).collect(),
            _ => ssl.peer_certificate().into_iter().collect(),
        }
    }

    fn close(&mut self) -> Result<(), ExpiryError> {
        match self.shutdown() {
            Ok(_) => Ok(()),
            // Peer already sent close_notify.
            Err(e) if e.code() == ErrorCode::ZERO_RETURN => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
