//! This mod is responsible for describing a node to `create_kv_node()`.

use crate::api::KvOptions;
use std::net::Ipv4Addr;

pub struct KvNodeConfig {
    pub my_node_id: String,
    /// Address the node's gRPC server listens on.
    pub ip_addr: Ipv4Addr,
    pub port: u16,
    pub role: RoleConfig,
    pub info_logger: slog::Logger,
    pub options: KvOptions,
}

/// A node's role is fixed for its lifetime.
pub enum RoleConfig {
    Leader { followers: Vec<FollowerInfo> },
    Follower,
}

#[derive(Clone, Debug)]
pub struct FollowerInfo {
    pub follower_id: String,
    pub ip_addr: Ipv4Addr,
    pub port: u16,
}
