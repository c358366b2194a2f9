use crate::grpc::grpc_kv_client::GrpcKvClient;
use crate::grpc::{proto_replicate_error, proto_replicate_result, ProtoReplicateReq, ProtoReplicateResult};
use crate::replication::channel::{self, ConnectError};
use crate::store::Version;
use bytes::Bytes;
use std::net::Ipv4Addr;
use tonic::transport::Channel;
use tonic::Status;

/// A single write being pushed from the leader to one follower.
#[derive(Clone, Debug)]
pub(crate) struct ReplicateRequest {
    pub(crate) key: String,
    pub(crate) value: Bytes,
    pub(crate) version: Version,
}

/// FollowerClient is the leader's transport to one follower's replicate handler.
///
/// `Ok(updated)` means the follower acknowledged the write. `updated` is false when the follower
/// already had an equal or newer version, which is still an acknowledgment.
#[async_trait::async_trait]
pub(crate) trait FollowerClient: Send + Sync {
    async fn replicate(&self, request: ReplicateRequest) -> Result<bool, FollowerCallError>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FollowerCallError {
    #[error("Replicate RPC failed: {0}")]
    Rpc(Status),
    #[error("Peer is not a follower")]
    NotFollower,
    #[error("Malformed Replicate reply")]
    MalformedReply,
}

pub(crate) struct GrpcFollowerClient {
    inner: GrpcKvClient<Channel>,
}

impl GrpcFollowerClient {
    pub(crate) fn new(ip: Ipv4Addr, port: u16) -> Result<Self, ConnectError> {
        let channel = channel::lazy_channel(ip, port)?;

        Ok(GrpcFollowerClient {
            inner: GrpcKvClient::new(channel),
        })
    }

    fn convert_replicate_rpc_reply(rpc_reply: Result<ProtoReplicateResult, Status>) -> Result<bool, FollowerCallError> {
        match rpc_reply {
            Ok(rpc_result) => match rpc_result.result {
                Some(proto_replicate_result::Result::Ok(ok)) => Ok(ok.updated),
                Some(proto_replicate_result::Result::Err(err)) => match err.err {
                    Some(proto_replicate_error::Err::NotFollower(_)) => Err(FollowerCallError::NotFollower),
                    None => Err(FollowerCallError::MalformedReply),
                },
                None => Err(FollowerCallError::MalformedReply),
            },
            Err(rpc_status) => Err(FollowerCallError::Rpc(rpc_status)),
        }
    }
}

#[async_trait::async_trait]
impl FollowerClient for GrpcFollowerClient {
    async fn replicate(&self, request: ReplicateRequest) -> Result<bool, FollowerCallError> {
        let rpc_request = ProtoReplicateReq {
            key: request.key,
            value: request.value.to_vec(),
            version: request.version.as_u64(),
        };

        // Generated client needs `&mut self`. Cloning shares the underlying channel.
        let mut client = self.inner.clone();
        let rpc_reply = client.replicate(rpc_request).await.map(|r| r.into_inner());

        Self::convert_replicate_rpc_reply(rpc_reply)
    }
}
