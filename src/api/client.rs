use crate::api::types::{HealthOutput, KvEntry, NodeRole, ReplicateOutput, WriteOutput, WriteStatus};
use crate::grpc::grpc_kv_client::GrpcKvClient;
use crate::grpc::{
    proto_health_result, proto_read_result, proto_replicate_error, proto_replicate_result, proto_write_error,
    proto_write_result, ProtoDumpReq, ProtoEntry, ProtoHealthReq, ProtoReadReq, ProtoReplicateReq, ProtoWriteReq,
};
use crate::replication::{self, ConnectError};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use tokio::time::{Duration, Instant};
use tonic::transport::Channel;
use tonic::Status;

/// KvClient talks to one node over gRPC. It is cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct KvClient {
    inner: GrpcKvClient<Channel>,
}

#[derive(Debug, thiserror::Error)]
pub enum KvClientError {
    #[error("RPC failed: {0}")]
    Rpc(Status),
    #[error("Node is not the leader")]
    NotLeader,
    #[error("Node is not a follower")]
    NotFollower,
    #[error("Malformed reply from node")]
    MalformedReply,
    #[error("Node did not become healthy in time")]
    Timeout,
}

impl From<Status> for KvClientError {
    fn from(status: Status) -> Self {
        KvClientError::Rpc(status)
    }
}

impl KvClient {
    /// Does not wait for the node to be reachable. See `wait_until_healthy()`.
    pub fn connect(ip_addr: Ipv4Addr, port: u16) -> Result<Self, ConnectError> {
        let channel = replication::lazy_channel(ip_addr, port)?;

        Ok(KvClient {
            inner: GrpcKvClient::new(channel),
        })
    }

    pub async fn write(&self, key: String, value: Bytes) -> Result<WriteOutput, KvClientError> {
        let rpc_request = ProtoWriteReq {
            key,
            value: value.to_vec(),
        };
        let rpc_reply = self.inner.clone().write(rpc_request).await?.into_inner();

        match rpc_reply.result {
            Some(proto_write_result::Result::Ok(ok)) => Ok(WriteOutput {
                version: ok.version,
                status: WriteStatus::from_quorum_met(ok.quorum_met),
            }),
            Some(proto_write_result::Result::Err(err)) => match err.err {
                Some(proto_write_error::Err::NotLeader(_)) => Err(KvClientError::NotLeader),
                None => Err(KvClientError::MalformedReply),
            },
            None => Err(KvClientError::MalformedReply),
        }
    }

    pub async fn read(&self, key: String) -> Result<Option<KvEntry>, KvClientError> {
        let rpc_reply = self.inner.clone().read(ProtoReadReq { key }).await?.into_inner();

        match rpc_reply.result {
            Some(proto_read_result::Result::Found(entry)) => Ok(Some(convert_entry(entry))),
            Some(proto_read_result::Result::NotFound(_)) => Ok(None),
            None => Err(KvClientError::MalformedReply),
        }
    }

    /// Push a versioned write directly to a follower, the way the leader does.
    pub async fn replicate(&self, key: String, value: Bytes, version: u64) -> Result<ReplicateOutput, KvClientError> {
        let rpc_request = ProtoReplicateReq {
            key,
            value: value.to_vec(),
            version,
        };
        let rpc_reply = self.inner.clone().replicate(rpc_request).await?.into_inner();

        match rpc_reply.result {
            Some(proto_replicate_result::Result::Ok(ok)) => Ok(ReplicateOutput { updated: ok.updated }),
            Some(proto_replicate_result::Result::Err(err)) => match err.err {
                Some(proto_replicate_error::Err::NotFollower(_)) => Err(KvClientError::NotFollower),
                None => Err(KvClientError::MalformedReply),
            },
            None => Err(KvClientError::MalformedReply),
        }
    }

    pub async fn dump(&self) -> Result<BTreeMap<String, KvEntry>, KvClientError> {
        let rpc_reply = self.inner.clone().dump(ProtoDumpReq {}).await?.into_inner();

        Ok(rpc_reply
            .entries
            .into_iter()
            .map(|(key, entry)| (key, convert_entry(entry)))
            .collect())
    }

    pub async fn health(&self) -> Result<HealthOutput, KvClientError> {
        let rpc_reply = self.inner.clone().health(ProtoHealthReq {}).await?.into_inner();

        let role = match rpc_reply.role {
            Some(proto_health_result::Role::Leader(_)) => NodeRole::Leader,
            Some(proto_health_result::Role::Follower(_)) => NodeRole::Follower,
            None => return Err(KvClientError::MalformedReply),
        };

        Ok(HealthOutput {
            node_id: rpc_reply.node_id,
            role,
        })
    }

    /// Poll `health()` until the node answers or `timeout` elapses. A node that accepts
    /// connections but never replies counts as not answering.
    pub async fn wait_until_healthy(&self, timeout: Duration) -> Result<HealthOutput, KvClientError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, self.health()).await {
                Ok(Ok(health)) => return Ok(health),
                Ok(Err(KvClientError::Rpc(_))) if Instant::now() < deadline => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    tokio::time::sleep(remaining.min(Duration::from_millis(50))).await;
                }
                Ok(Err(KvClientError::Rpc(_))) | Err(_) => return Err(KvClientError::Timeout),
                Ok(Err(e)) => return Err(e),
            }
        }
    }
}

fn convert_entry(entry: ProtoEntry) -> KvEntry {
    KvEntry {
        value: Bytes::from(entry.value),
        version: entry.version,
    }
}
