use crate::api::types::{
    HealthOutput, KvEntry, ReadError, ReplicateError, ReplicateOutput, WriteError, WriteOutput,
};
use crate::node::{KvNode, ReadInput, ReplicateInput, WriteInput};
use crate::server::ServerShutdownHandle;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-process access to a running node. Calls skip the network but go through the same handlers
/// as the node's gRPC server.
pub struct KvNodeHandle {
    node: Arc<KvNode>,
    server_shutdown_handle: ServerShutdownHandle,
}

impl KvNodeHandle {
    pub(super) fn new(node: Arc<KvNode>, server_shutdown_handle: ServerShutdownHandle) -> Self {
        KvNodeHandle {
            node,
            server_shutdown_handle,
        }
    }

    pub async fn write(&self, key: String, value: Bytes) -> Result<WriteOutput, WriteError> {
        self.node
            .handle_write(WriteInput { key, value })
            .await
            .map(WriteOutput::from)
            .map_err(WriteError::from)
    }

    pub fn read(&self, key: String) -> Result<Option<KvEntry>, ReadError> {
        self.node
            .handle_read(ReadInput { key })
            .map(|entry| entry.map(KvEntry::from))
            .map_err(ReadError::from)
    }

    pub fn replicate(&self, key: String, value: Bytes, version: u64) -> Result<ReplicateOutput, ReplicateError> {
        self.node
            .handle_replicate(ReplicateInput { key, value, version })
            .map(ReplicateOutput::from)
            .map_err(ReplicateError::from)
    }

    pub fn dump(&self) -> BTreeMap<String, KvEntry> {
        self.node
            .handle_dump()
            .into_iter()
            .map(|(key, entry)| (key, KvEntry::from(entry)))
            .collect()
    }

    pub fn health(&self) -> HealthOutput {
        HealthOutput::from(self.node.handle_health())
    }

    /// Stop the gRPC server. In-flight replication tasks are not affected.
    pub fn shutdown(&mut self) {
        self.server_shutdown_handle.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NodeRole, WriteStatus};
    use crate::node::NodeId;
    use crate::replication::test_utils::{scripted_followers, test_logger, CallCounters, Script};
    use crate::replication::QuorumReplicator;
    use crate::server;

    fn handle(node: KvNode) -> KvNodeHandle {
        let (server_shutdown_handle, _) = server::shutdown_signal();
        KvNodeHandle::new(Arc::new(node), server_shutdown_handle)
    }

    #[tokio::test]
    async fn leader_handle() {
        let replicator = QuorumReplicator::new(
            test_logger(),
            scripted_followers(vec![Script::Ack, Script::Fail, Script::Fail], &CallCounters::new()),
            2,
        );
        let leader = handle(KvNode::new_leader(test_logger(), NodeId::new("leader".into()), replicator));

        let output = leader.write("k".into(), Bytes::from("v")).await.expect("write");
        assert_eq!(output.version, 1);
        assert_eq!(output.status, WriteStatus::PartialSuccess);

        let entry = leader.read("k".into()).expect("read").expect("entry");
        assert_eq!(entry.value, Bytes::from("v"));
        assert_eq!(entry.version, 1);
        assert_eq!(leader.dump().get("k"), Some(&entry));

        assert!(matches!(
            leader.replicate("k".into(), Bytes::from("x"), 9),
            Err(ReplicateError::NotFollower)
        ));
        assert_eq!(leader.health().role, NodeRole::Leader);
    }

    #[tokio::test]
    async fn follower_handle() {
        let mut follower = handle(KvNode::new_follower(test_logger(), NodeId::new("f1".into())));

        assert!(matches!(
            follower.write("k".into(), Bytes::from("v")).await,
            Err(WriteError::NotLeader)
        ));
        assert!(matches!(follower.read("".into()), Err(ReadError::MissingKey)));

        let output = follower.replicate("k".into(), Bytes::from("v"), 2).expect("replicate");
        assert!(output.updated);
        assert_eq!(follower.read("k".into()).expect("read").map(|e| e.version), Some(2));

        let health = follower.health();
        assert_eq!(health.node_id, "f1");
        assert_eq!(health.role, NodeRole::Follower);

        follower.shutdown();
    }
}
