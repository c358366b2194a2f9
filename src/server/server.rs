use crate::grpc::grpc_kv_server::{GrpcKv, GrpcKvServer};
use crate::grpc::{
    proto_health_result, proto_read_result, proto_replicate_error, proto_replicate_result, proto_write_error,
    proto_write_result, ProtoDumpReq, ProtoDumpResult, ProtoEntry, ProtoFollowerRole, ProtoHealthReq,
    ProtoHealthResult, ProtoKeyNotFound, ProtoLeaderRole, ProtoNotFollower, ProtoNotLeader, ProtoReadReq,
    ProtoReadResult, ProtoReplicateError, ProtoReplicateReq, ProtoReplicateResult, ProtoReplicateSuccess,
    ProtoWriteError, ProtoWriteReq, ProtoWriteResult, ProtoWriteSuccess,
};
use crate::node::{
    HealthOutput, KvNode, ReadError, ReadInput, ReplicateError, ReplicateInput, ReplicateOutput, Role, WriteError,
    WriteInput, WriteOutput,
};
use crate::server::ServerShutdownSignal;
use crate::store::Entry;
use bytes::Bytes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the KV gRPC interface on top of a local `KvNode`.
pub(crate) struct RpcServer {
    logger: slog::Logger,
    node: Arc<KvNode>,
}

impl RpcServer {
    pub(crate) fn new(logger: slog::Logger, node: Arc<KvNode>) -> Self {
        RpcServer { logger, node }
    }

    pub(crate) async fn run(self, listener: TcpListener, shutdown_signal: ServerShutdownSignal) {
        let logger = self.logger.clone();
        match listener.local_addr() {
            Ok(socket_addr) => slog::info!(logger, "Listening on '{:?}'", socket_addr),
            Err(e) => slog::warn!(logger, "Listening on unknown address: {:?}", e),
        }

        let result = Server::builder()
            .add_service(GrpcKvServer::new(self))
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal)
            .await;

        match result {
            Ok(()) => slog::info!(logger, "Server run() has exited"),
            Err(e) => slog::error!(logger, "Server run() has exited with error: {:?}", e),
        }
    }

    // ------- Write -------

    async fn handle_write(&self, rpc_request: ProtoWriteReq) -> Result<ProtoWriteResult, Status> {
        let app_input = WriteInput {
            key: rpc_request.key,
            value: Bytes::from(rpc_request.value),
        };
        let app_result = self.node.handle_write(app_input).await;
        Self::convert_write_result(app_result)
    }

    fn convert_write_result(app_result: Result<WriteOutput, WriteError>) -> Result<ProtoWriteResult, Status> {
        match app_result {
            Ok(ok) => Ok(ProtoWriteResult {
                result: Some(proto_write_result::Result::Ok(ProtoWriteSuccess {
                    version: ok.version.as_u64(),
                    quorum_met: ok.quorum_met,
                })),
            }),
            Err(WriteError::NotLeader) => Ok(ProtoWriteResult {
                result: Some(proto_write_result::Result::Err(ProtoWriteError {
                    err: Some(proto_write_error::Err::NotLeader(ProtoNotLeader {
                        // Empty
                    })),
                })),
            }),
            Err(e @ WriteError::MissingKey) => Err(Status::invalid_argument(e.to_string())),
        }
    }

    // ------- Read -------

    fn handle_read(&self, rpc_request: ProtoReadReq) -> Result<ProtoReadResult, Status> {
        let app_result = self.node.handle_read(ReadInput { key: rpc_request.key });
        Self::convert_read_result(app_result)
    }

    fn convert_read_result(app_result: Result<Option<Entry>, ReadError>) -> Result<ProtoReadResult, Status> {
        match app_result {
            Ok(Some(entry)) => Ok(ProtoReadResult {
                result: Some(proto_read_result::Result::Found(Self::convert_entry(entry))),
            }),
            Ok(None) => Ok(ProtoReadResult {
                result: Some(proto_read_result::Result::NotFound(ProtoKeyNotFound {
                    // Empty
                })),
            }),
            Err(e @ ReadError::MissingKey) => Err(Status::invalid_argument(e.to_string())),
        }
    }

    fn convert_entry(entry: Entry) -> ProtoEntry {
        ProtoEntry {
            value: entry.value.to_vec(),
            version: entry.version.as_u64(),
        }
    }

    // ------- Replicate -------

    fn handle_replicate(&self, rpc_request: ProtoReplicateReq) -> Result<ProtoReplicateResult, Status> {
        let app_input = ReplicateInput {
            key: rpc_request.key,
            value: Bytes::from(rpc_request.value),
            version: rpc_request.version,
        };
        let app_result = self.node.handle_replicate(app_input);
        Self::convert_replicate_result(app_result)
    }

    fn convert_replicate_result(
        app_result: Result<ReplicateOutput, ReplicateError>,
    ) -> Result<ProtoReplicateResult, Status> {
        match app_result {
            Ok(ok) => Ok(ProtoReplicateResult {
                result: Some(proto_replicate_result::Result::Ok(ProtoReplicateSuccess {
                    updated: ok.updated,
                })),
            }),
            Err(ReplicateError::NotFollower) => Ok(ProtoReplicateResult {
                result: Some(proto_replicate_result::Result::Err(ProtoReplicateError {
                    err: Some(proto_replicate_error::Err::NotFollower(ProtoNotFollower {
                        // Empty
                    })),
                })),
            }),
            Err(e @ ReplicateError::MissingKey) | Err(e @ ReplicateError::MissingVersion) => {
                Err(Status::invalid_argument(e.to_string()))
            }
        }
    }

    // ------- Dump / Health -------

    fn handle_dump(&self) -> ProtoDumpResult {
        let entries = self
            .node
            .handle_dump()
            .into_iter()
            .map(|(key, entry)| (key, Self::convert_entry(entry)))
            .collect();

        ProtoDumpResult { entries }
    }

    fn convert_health(app_output: HealthOutput) -> ProtoHealthResult {
        let role = match app_output.role {
            Role::Leader => proto_health_result::Role::Leader(ProtoLeaderRole {}),
            Role::Follower => proto_health_result::Role::Follower(ProtoFollowerRole {}),
        };

        ProtoHealthResult {
            node_id: app_output.node_id.into_inner(),
            role: Some(role),
        }
    }
}

#[async_trait::async_trait]
impl GrpcKv for RpcServer {
    async fn write(&self, rpc_request_wrapped: Request<ProtoWriteReq>) -> Result<Response<ProtoWriteResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_write(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn read(&self, rpc_request_wrapped: Request<ProtoReadReq>) -> Result<Response<ProtoReadResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_read(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn replicate(
        &self,
        rpc_request_wrapped: Request<ProtoReplicateReq>,
    ) -> Result<Response<ProtoReplicateResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_replicate(rpc_request);
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn dump(&self, _: Request<ProtoDumpReq>) -> Result<Response<ProtoDumpResult>, Status> {
        Ok(Response::new(self.handle_dump()))
    }

    async fn health(&self, _: Request<ProtoHealthReq>) -> Result<Response<ProtoHealthResult>, Status> {
        Ok(Response::new(Self::convert_health(self.node.handle_health())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use crate::replication::test_utils::test_logger;
    use tonic::Code;

    fn follower_server() -> RpcServer {
        let node = KvNode::new_follower(test_logger(), NodeId::new("follower-1".into()));
        RpcServer::new(test_logger(), Arc::new(node))
    }

    #[tokio::test]
    async fn write_on_follower_is_not_leader() {
        let server = follower_server();
        let reply = server
            .handle_write(ProtoWriteReq {
                key: "k".into(),
                value: b"v".to_vec(),
            })
            .await
            .expect("reply");

        match reply.result {
            Some(proto_write_result::Result::Err(ProtoWriteError {
                err: Some(proto_write_error::Err::NotLeader(_)),
            })) => {}
            other => panic!("Unexpected reply {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_key_is_invalid_argument() {
        let server = follower_server();
        let status = server
            .handle_write(ProtoWriteReq {
                key: "".into(),
                value: b"v".to_vec(),
            })
            .await
            .expect_err("invalid");
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = server
            .handle_read(ProtoReadReq { key: "".into() })
            .expect_err("invalid");
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[test]
    fn replicate_then_read_and_dump() {
        let server = follower_server();

        let reply = server
            .handle_replicate(ProtoReplicateReq {
                key: "k".into(),
                value: b"v".to_vec(),
                version: 4,
            })
            .expect("reply");
        match reply.result {
            Some(proto_replicate_result::Result::Ok(ok)) => assert!(ok.updated),
            other => panic!("Unexpected reply {:?}", other),
        }

        let reply = server.handle_read(ProtoReadReq { key: "k".into() }).expect("reply");
        match reply.result {
            Some(proto_read_result::Result::Found(entry)) => {
                assert_eq!(entry.value, b"v".to_vec());
                assert_eq!(entry.version, 4);
            }
            other => panic!("Unexpected reply {:?}", other),
        }

        let reply = server.handle_read(ProtoReadReq { key: "nope".into() }).expect("reply");
        assert!(matches!(reply.result, Some(proto_read_result::Result::NotFound(_))));

        let dump = server.handle_dump();
        assert_eq!(dump.entries.len(), 1);
        assert_eq!(dump.entries.get("k").map(|e| e.version), Some(4));
    }

    #[test]
    fn replicate_version_zero_is_invalid_argument() {
        let server = follower_server();
        let status = server
            .handle_replicate(ProtoReplicateReq {
                key: "k".into(),
                value: b"v".to_vec(),
                version: 0,
            })
            .expect_err("invalid");
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[test]
    fn health_of_follower() {
        let server = follower_server();
        let health = RpcServer::convert_health(server.node.handle_health());
        assert_eq!(health.node_id, "follower-1");
        assert!(matches!(health.role, Some(proto_health_result::Role::Follower(_))));
    }
}
