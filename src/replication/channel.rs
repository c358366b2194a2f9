use std::net::Ipv4Addr;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};

/// Create a channel to a node's gRPC server. The connection is established on first use, so the
/// remote node does not need to be up yet.
pub(crate) fn lazy_channel(ip: Ipv4Addr, port: u16) -> Result<Channel, ConnectError> {
    let ip_octets = ip.octets();
    let url = format!(
        "http://{}.{}.{}.{}:{}",
        ip_octets[0], ip_octets[1], ip_octets[2], ip_octets[3], port
    );
    let endpoint = Endpoint::from_shared(url)?;

    Ok(endpoint.connect_lazy()?)
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid node URI: {0}")]
    InvalidUri(uri::InvalidUri),
    #[error("Failed to create channel: {0}")]
    ConnectFailure(tonic::transport::Error),
}

impl From<uri::InvalidUri> for ConnectError {
    fn from(e: uri::InvalidUri) -> Self {
        ConnectError::InvalidUri(e)
    }
}

impl From<tonic::transport::Error> for ConnectError {
    fn from(e: tonic::transport::Error) -> Self {
        ConnectError::ConnectFailure(e)
    }
}
