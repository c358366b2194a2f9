mod acceptor;
mod channel;
mod follower_client;
mod quorum;
mod replication_client;

pub(crate) use acceptor::ReplicaAcceptor;
pub(crate) use channel::lazy_channel;
pub use channel::ConnectError;
#[cfg(test)]
pub(crate) use follower_client::FollowerCallError;
pub(crate) use follower_client::FollowerClient;
pub(crate) use follower_client::GrpcFollowerClient;
pub(crate) use follower_client::ReplicateRequest;
pub(crate) use quorum::QuorumReplicator;
pub(crate) use replication_client::FollowerId;
pub(crate) use replication_client::ReplicationClient;
pub(crate) use replication_client::ReplicationOutcome;

#[cfg(test)]
pub(crate) mod test_utils;
