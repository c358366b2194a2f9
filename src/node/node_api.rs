use crate::node::NodeId;
use crate::store::Version;
use bytes::Bytes;

#[derive(Debug)]
pub(crate) struct WriteInput {
    pub(crate) key: String,
    pub(crate) value: Bytes,
}

#[derive(Debug)]
pub(crate) struct WriteOutput {
    pub(crate) version: Version,
    // False means the write is applied on the leader but not (yet) known to be on a quorum of
    // followers. It is never rolled back.
    pub(crate) quorum_met: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum WriteError {
    #[error("Key is required")]
    MissingKey,
    #[error("Writes are only accepted by the leader")]
    NotLeader,
}

#[derive(Debug)]
pub(crate) struct ReadInput {
    pub(crate) key: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ReadError {
    #[error("Key is required")]
    MissingKey,
}

#[derive(Debug)]
pub(crate) struct ReplicateInput {
    pub(crate) key: String,
    pub(crate) value: Bytes,
    // Raw version off the wire. 0 is never minted by a leader.
    pub(crate) version: u64,
}

#[derive(Debug)]
pub(crate) struct ReplicateOutput {
    pub(crate) updated: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ReplicateError {
    #[error("Key is required")]
    MissingKey,
    #[error("Version is required")]
    MissingVersion,
    #[error("Replicated writes are only accepted by followers")]
    NotFollower,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Role {
    Leader,
    Follower,
}

#[derive(Debug)]
pub(crate) struct HealthOutput {
    pub(crate) node_id: NodeId,
    pub(crate) role: Role,
}
