use crate::node;
use crate::store;
use bytes::Bytes;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KvEntry {
    pub value: Bytes,
    pub version: u64,
}

/// Whether a write reached the configured write quorum of followers.
///
/// `PartialSuccess` is not a failure. The write is applied on the leader and is never rolled back;
/// it just isn't known to be on a quorum of followers yet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteStatus {
    Success,
    PartialSuccess,
}

impl WriteStatus {
    pub(crate) fn from_quorum_met(quorum_met: bool) -> Self {
        if quorum_met {
            WriteStatus::Success
        } else {
            WriteStatus::PartialSuccess
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteOutput {
    pub version: u64,
    pub status: WriteStatus,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplicateOutput {
    /// False if the follower already held an equal or newer version of the key.
    pub updated: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeRole {
    Leader,
    Follower,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthOutput {
    pub node_id: String,
    pub role: NodeRole,
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Key is required")]
    MissingKey,
    #[error("Writes are only accepted by the leader")]
    NotLeader,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Key is required")]
    MissingKey,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplicateError {
    #[error("Key is required")]
    MissingKey,
    #[error("Version is required")]
    MissingVersion,
    #[error("Replicated writes are only accepted by followers")]
    NotFollower,
}

// ------- Conversions --------

impl From<store::Entry> for KvEntry {
    fn from(internal_entry: store::Entry) -> Self {
        KvEntry {
            value: internal_entry.value,
            version: internal_entry.version.as_u64(),
        }
    }
}

impl From<node::WriteOutput> for WriteOutput {
    fn from(internal_output: node::WriteOutput) -> Self {
        WriteOutput {
            version: internal_output.version.as_u64(),
            status: WriteStatus::from_quorum_met(internal_output.quorum_met),
        }
    }
}

impl From<node::ReplicateOutput> for ReplicateOutput {
    fn from(internal_output: node::ReplicateOutput) -> Self {
        ReplicateOutput {
            updated: internal_output.updated,
        }
    }
}

impl From<node::Role> for NodeRole {
    fn from(internal_role: node::Role) -> Self {
        match internal_role {
            node::Role::Leader => NodeRole::Leader,
            node::Role::Follower => NodeRole::Follower,
        }
    }
}

impl From<node::HealthOutput> for HealthOutput {
    fn from(internal_output: node::HealthOutput) -> Self {
        HealthOutput {
            node_id: internal_output.node_id.into_inner(),
            role: NodeRole::from(internal_output.role),
        }
    }
}

impl From<node::WriteError> for WriteError {
    fn from(internal_error: node::WriteError) -> Self {
        match internal_error {
            node::WriteError::MissingKey => WriteError::MissingKey,
            node::WriteError::NotLeader => WriteError::NotLeader,
        }
    }
}

impl From<node::ReadError> for ReadError {
    fn from(internal_error: node::ReadError) -> Self {
        match internal_error {
            node::ReadError::MissingKey => ReadError::MissingKey,
        }
    }
}

impl From<node::ReplicateError> for ReplicateError {
    fn from(internal_error: node::ReplicateError) -> Self {
        match internal_error {
            node::ReplicateError::MissingKey => ReplicateError::MissingKey,
            node::ReplicateError::MissingVersion => ReplicateError::MissingVersion,
            node::ReplicateError::NotFollower => ReplicateError::NotFollower,
        }
    }
}
