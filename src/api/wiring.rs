use crate::api::configuration::{FollowerInfo, KvNodeConfig, RoleConfig};
use crate::api::node_handle::KvNodeHandle;
use crate::api::options::{KvOptions, KvOptionsValidated};
use crate::node::{KvNode, NodeId};
use crate::replication::{ConnectError, FollowerId, GrpcFollowerClient, QuorumReplicator, ReplicationClient};
use crate::server::{self, RpcServer};
use std::collections::HashSet;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, thiserror::Error)]
pub enum KvNodeCreationError {
    #[error("A leader needs at least one follower")]
    NoFollowers,
    #[error("Illegal options for configuring node: {0}")]
    IllegalOptions(String),
    #[error("Follower '{0}' is configured more than once")]
    DuplicateFollower(String),
    #[error("Can't create client for follower '{0}'")]
    InvalidFollower(String, #[source] ConnectError),
    #[error("Can't bind gRPC server address")]
    ServerBind(#[source] io::Error),
}

/// Start a node: its store, its role's machinery, and its gRPC server on `ip_addr:port`.
///
/// The server's address is bound before this returns. The server itself is spawned onto the
/// current tokio runtime and runs until the returned handle is shut down or dropped.
pub async fn create_kv_node(config: KvNodeConfig) -> Result<KvNodeHandle, KvNodeCreationError> {
    let root_logger = config
        .info_logger
        .new(slog::o!("NodeId" => config.my_node_id.clone()));
    let node_id = NodeId::new(config.my_node_id);

    let node = match config.role {
        RoleConfig::Leader { followers } => {
            let replicator = create_replicator(&root_logger, followers, config.options)?;
            KvNode::new_leader(root_logger.clone(), node_id, replicator)
        }
        RoleConfig::Follower => KvNode::new_follower(root_logger.clone(), node_id),
    };
    let node = Arc::new(node);

    let listener = TcpListener::bind(rpc_server_addr(config.ip_addr, config.port))
        .await
        .map_err(KvNodeCreationError::ServerBind)?;

    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();
    let rpc_server = RpcServer::new(root_logger, node.clone());
    tokio::spawn(rpc_server.run(listener, server_shutdown_signal));

    Ok(KvNodeHandle::new(node, server_shutdown_handle))
}

fn create_replicator(
    logger: &slog::Logger,
    followers: Vec<FollowerInfo>,
    options: KvOptions,
) -> Result<QuorumReplicator, KvNodeCreationError> {
    if followers.is_empty() {
        return Err(KvNodeCreationError::NoFollowers);
    }

    let options = KvOptionsValidated::try_from_options(options, followers.len())
        .map_err(KvNodeCreationError::IllegalOptions)?;

    let mut seen_ids = HashSet::new();
    let mut clients = Vec::with_capacity(followers.len());
    for follower in followers {
        if !seen_ids.insert(follower.follower_id.clone()) {
            return Err(KvNodeCreationError::DuplicateFollower(follower.follower_id));
        }

        let transport = GrpcFollowerClient::new(follower.ip_addr, follower.port)
            .map_err(|e| KvNodeCreationError::InvalidFollower(follower.follower_id.clone(), e))?;
        let follower_id = FollowerId::new(follower.follower_id);

        clients.push(ReplicationClient::new(
            logger.clone(),
            follower_id,
            Arc::new(transport),
            options.min_replication_delay,
            options.max_replication_delay,
        ));
    }

    Ok(QuorumReplicator::new(logger.clone(), clients, options.write_quorum))
}

fn rpc_server_addr(ip_addr: Ipv4Addr, port: u16) -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(ip_addr, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    fn follower_info(id: &str, port: u16) -> FollowerInfo {
        FollowerInfo {
            follower_id: id.into(),
            ip_addr: Ipv4Addr::LOCALHOST,
            port,
        }
    }

    fn leader_config(followers: Vec<FollowerInfo>, options: KvOptions) -> KvNodeConfig {
        KvNodeConfig {
            my_node_id: "leader".into(),
            ip_addr: Ipv4Addr::LOCALHOST,
            // Never bound: these tests fail before the server is spawned.
            port: 0,
            role: RoleConfig::Leader { followers },
            info_logger: slog::Logger::root(slog::Discard, slog::o!()),
            options,
        }
    }

    #[tokio::test]
    async fn port_in_use_is_rejected() {
        let taken = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind");
        let port = taken.local_addr().expect("local addr").port();

        let result = create_kv_node(KvNodeConfig {
            my_node_id: "follower-1".into(),
            ip_addr: Ipv4Addr::LOCALHOST,
            port,
            role: RoleConfig::Follower,
            info_logger: slog::Logger::root(slog::Discard, slog::o!()),
            options: KvOptions::default(),
        })
        .await;

        assert!(matches!(result, Err(KvNodeCreationError::ServerBind(_))));
    }

    #[tokio::test]
    async fn follower_serves_on_its_port() {
        let mut node = create_kv_node(KvNodeConfig {
            my_node_id: "follower-1".into(),
            ip_addr: Ipv4Addr::LOCALHOST,
            port: 17950,
            role: RoleConfig::Follower,
            info_logger: slog::Logger::root(slog::Discard, slog::o!()),
            options: KvOptions::default(),
        })
        .await
        .expect("node");

        // The port is held by the node's server now.
        assert!(std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 17950)).is_err());

        node.shutdown();
    }

    #[tokio::test]
    async fn leader_without_followers_is_rejected() {
        let result = create_kv_node(leader_config(vec![], KvOptions::default())).await;
        assert!(matches!(result, Err(KvNodeCreationError::NoFollowers)));
    }

    #[tokio::test]
    async fn quorum_larger_than_followers_is_rejected() {
        let options = KvOptions {
            write_quorum: Some(3),
            ..KvOptions::default()
        };
        let followers = vec![follower_info("f1", 1), follower_info("f2", 2)];
        let result = create_kv_node(leader_config(followers, options)).await;
        assert!(matches!(result, Err(KvNodeCreationError::IllegalOptions(_))));
    }

    #[tokio::test]
    async fn inverted_delay_range_is_rejected() {
        let options = KvOptions {
            min_replication_delay: Some(Duration::from_millis(2)),
            max_replication_delay: Some(Duration::from_millis(1)),
            ..KvOptions::default()
        };
        let result = create_kv_node(leader_config(vec![follower_info("f1", 1)], options)).await;
        assert!(matches!(result, Err(KvNodeCreationError::IllegalOptions(_))));
    }

    #[tokio::test]
    async fn duplicate_follower_is_rejected() {
        let followers = vec![follower_info("f1", 1), follower_info("f1", 2)];
        let result = create_kv_node(leader_config(followers, KvOptions::default())).await;
        match result {
            Err(KvNodeCreationError::DuplicateFollower(id)) => assert_eq!(id, "f1"),
            Err(e) => panic!("Unexpected error {:?}", e),
            Ok(_) => panic!("Expected error"),
        }
    }
}
