use crate::node::node_api::{
    HealthOutput, ReadError, ReadInput, ReplicateError, ReplicateInput, ReplicateOutput, Role, WriteError, WriteInput,
    WriteOutput,
};
use crate::replication::{QuorumReplicator, ReplicaAcceptor, ReplicateRequest};
use crate::store::{Entry, Version, VersionAllocator, VersionedStore};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub(crate) struct NodeId(String);

impl NodeId {
    pub(crate) fn new(id: String) -> Self {
        NodeId(id)
    }

    pub(crate) fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role is fixed at startup. There is no election.
enum RoleState {
    Leader {
        version_allocator: VersionAllocator,
        replicator: QuorumReplicator,
    },
    Follower {
        acceptor: ReplicaAcceptor,
    },
}

/// KvNode is one member of the cluster: its store plus whatever its role needs to mutate it.
///
/// Handlers take `&self` and are safe to call concurrently. Unrelated writes only contend on the
/// short store lock, never on each other's replication.
pub(crate) struct KvNode {
    logger: slog::Logger,
    node_id: NodeId,
    store: Arc<VersionedStore>,
    role: RoleState,
}

impl KvNode {
    pub(crate) fn new_leader(logger: slog::Logger, node_id: NodeId, replicator: QuorumReplicator) -> Self {
        slog::info!(
            logger,
            "Leader starting with WRITE_QUORUM={} of {} followers",
            replicator.write_quorum(),
            replicator.num_followers()
        );

        KvNode {
            logger,
            node_id,
            store: Arc::new(VersionedStore::new()),
            role: RoleState::Leader {
                version_allocator: VersionAllocator::new(),
                replicator,
            },
        }
    }

    pub(crate) fn new_follower(logger: slog::Logger, node_id: NodeId) -> Self {
        slog::info!(logger, "Follower {} starting", node_id);

        let store = Arc::new(VersionedStore::new());
        let acceptor = ReplicaAcceptor::new(logger.clone(), store.clone());

        KvNode {
            logger,
            node_id,
            store,
            role: RoleState::Follower { acceptor },
        }
    }

    pub(crate) fn role(&self) -> Role {
        match self.role {
            RoleState::Leader { .. } => Role::Leader,
            RoleState::Follower { .. } => Role::Follower,
        }
    }

    pub(crate) async fn handle_write(&self, input: WriteInput) -> Result<WriteOutput, WriteError> {
        if input.key.is_empty() {
            return Err(WriteError::MissingKey);
        }

        let (version_allocator, replicator) = match &self.role {
            RoleState::Leader {
                version_allocator,
                replicator,
            } => (version_allocator, replicator),
            RoleState::Follower { .. } => return Err(WriteError::NotLeader),
        };

        // Version assignment and local apply are one step, so the leader's own copy of a key
        // always holds the highest version minted for it.
        let version = self
            .store
            .put_with_new_version(input.key.clone(), input.value.clone(), || {
                version_allocator.next_version()
            });

        let logger = self
            .logger
            .new(slog::o!("Key" => input.key.clone(), "Version" => version.as_u64()));
        slog::debug!(logger, "Applied write locally. Replicating.");

        let quorum_met = replicator
            .replicate(ReplicateRequest {
                key: input.key,
                value: input.value,
                version,
            })
            .await;

        if quorum_met {
            slog::info!(logger, "Write successful");
        } else {
            slog::warn!(logger, "Write quorum not met, but data written to leader");
        }

        Ok(WriteOutput { version, quorum_met })
    }

    pub(crate) fn handle_read(&self, input: ReadInput) -> Result<Option<Entry>, ReadError> {
        if input.key.is_empty() {
            return Err(ReadError::MissingKey);
        }

        Ok(self.store.get(&input.key))
    }

    pub(crate) fn handle_replicate(&self, input: ReplicateInput) -> Result<ReplicateOutput, ReplicateError> {
        if input.key.is_empty() {
            return Err(ReplicateError::MissingKey);
        }
        if input.version == 0 {
            return Err(ReplicateError::MissingVersion);
        }

        match &self.role {
            RoleState::Leader { .. } => Err(ReplicateError::NotFollower),
            RoleState::Follower { acceptor } => {
                let updated = acceptor.on_replicate(ReplicateRequest {
                    key: input.key,
                    value: input.value,
                    version: Version::new(input.version),
                });

                Ok(ReplicateOutput { updated })
            }
        }
    }

    pub(crate) fn handle_dump(&self) -> BTreeMap<String, Entry> {
        self.store.snapshot()
    }

    pub(crate) fn handle_health(&self) -> HealthOutput {
        HealthOutput {
            node_id: self.node_id.clone(),
            role: self.role(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::test_utils::{scripted_followers, test_logger, CallCounters, Script};
    use bytes::Bytes;
    use tokio::time::Duration;

    fn leader(scripts: Vec<Script>, write_quorum: usize) -> KvNode {
        let counters = CallCounters::new();
        let replicator = QuorumReplicator::new(test_logger(), scripted_followers(scripts, &counters), write_quorum);
        KvNode::new_leader(test_logger(), NodeId::new("leader".into()), replicator)
    }

    fn follower() -> KvNode {
        KvNode::new_follower(test_logger(), NodeId::new("follower-1".into()))
    }

    fn write_input(key: &str, value: &str) -> WriteInput {
        WriteInput {
            key: key.into(),
            value: Bytes::from(value.to_string()),
        }
    }

    fn read(node: &KvNode, key: &str) -> Option<Entry> {
        node.handle_read(ReadInput { key: key.into() }).expect("valid read")
    }

    async fn write(node: &KvNode, key: &str, value: &str) -> Result<WriteOutput, WriteError> {
        tokio::time::timeout(Duration::from_secs(5), node.handle_write(write_input(key, value)))
            .await
            .expect("Write should have returned")
    }

    #[tokio::test]
    async fn write_with_quorum_reports_success() {
        let node = leader(
            vec![Script::Ack, Script::Fail, Script::Ack, Script::Fail, Script::Ack],
            3,
        );

        let output = write(&node, "k", "v").await.expect("write");
        assert!(output.quorum_met);
        assert_eq!(output.version, Version::new(1));
    }

    #[tokio::test]
    async fn write_without_quorum_is_partial_but_readable_on_leader() {
        let node = leader(
            vec![Script::Ack, Script::Fail, Script::Fail, Script::Ack, Script::Fail],
            3,
        );

        let output = write(&node, "k", "v").await.expect("write");
        assert!(!output.quorum_met);

        let entry = read(&node, "k").expect("leader keeps its own write");
        assert_eq!(entry.value, Bytes::from("v"));
        assert_eq!(entry.version, output.version);
    }

    #[tokio::test]
    async fn early_failure_returns_before_hung_followers() {
        let node = leader(
            vec![Script::Hang, Script::Fail, Script::Ack, Script::Hang, Script::Fail],
            4,
        );

        let output = write(&node, "k", "v").await.expect("write");
        assert!(!output.quorum_met);
        assert_eq!(read(&node, "k").map(|e| e.version), Some(output.version));
    }

    #[tokio::test]
    async fn versions_increase_across_keys() {
        let node = leader(vec![Script::Ack, Script::Ack, Script::Ack], 2);

        let mut previous = Version::new(0);
        for (i, key) in ["a", "b", "a", "c", "b"].iter().enumerate() {
            let output = write(&node, key, &format!("v{}", i)).await.expect("write");
            assert!(output.version > previous);
            previous = output.version;

            // Read-your-writes on the leader.
            assert_eq!(read(&node, key).map(|e| e.version), Some(output.version));
        }
        assert_eq!(previous, Version::new(5));
    }

    #[tokio::test]
    async fn concurrent_writes_get_distinct_versions() {
        let node = Arc::new(leader(vec![Script::Ack, Script::Ack, Script::Ack], 2));

        let mut handles = Vec::new();
        for i in 0..50 {
            let node = node.clone();
            handles.push(tokio::spawn(async move {
                node.handle_write(write_input(&format!("key-{}", i % 5), "v"))
                    .await
                    .expect("write")
                    .version
            }));
        }

        let mut versions = Vec::new();
        for handle in handles {
            versions.push(handle.await.expect("join"));
        }
        versions.sort();
        versions.dedup();
        assert_eq!(versions.len(), 50);
        assert_eq!(node.handle_dump().len(), 5);
    }

    #[tokio::test]
    async fn write_validation_has_no_side_effect() {
        let node = leader(vec![Script::Ack], 1);

        assert!(matches!(write(&node, "", "v").await, Err(WriteError::MissingKey)));
        assert!(node.handle_dump().is_empty());

        // The rejected write must not have consumed a version.
        let output = write(&node, "k", "v").await.expect("write");
        assert_eq!(output.version, Version::new(1));
    }

    #[tokio::test]
    async fn follower_rejects_writes() {
        let node = follower();
        assert!(matches!(write(&node, "k", "v").await, Err(WriteError::NotLeader)));
        assert!(node.handle_dump().is_empty());
    }

    #[test]
    fn leader_rejects_replicate() {
        let node = leader(vec![Script::Ack], 1);
        let result = node.handle_replicate(ReplicateInput {
            key: "k".into(),
            value: Bytes::from("v"),
            version: 3,
        });
        assert!(matches!(result, Err(ReplicateError::NotFollower)));
        assert_eq!(read(&node, "k"), None);
    }

    #[test]
    fn follower_applies_highest_version() {
        let node = follower();
        let mut updated = Vec::new();
        for version in [5, 3, 7, 2].iter() {
            let output = node
                .handle_replicate(ReplicateInput {
                    key: "k".into(),
                    value: Bytes::from(format!("v{}", version)),
                    version: *version,
                })
                .expect("replicate");
            updated.push(output.updated);
        }

        assert_eq!(updated, vec![true, false, true, false]);
        let entry = read(&node, "k").expect("entry");
        assert_eq!(entry.version, Version::new(7));
        assert_eq!(entry.value, Bytes::from("v7"));
    }

    #[test]
    fn replicate_validation() {
        let node = follower();
        let missing_key = node.handle_replicate(ReplicateInput {
            key: "".into(),
            value: Bytes::from("v"),
            version: 1,
        });
        assert!(matches!(missing_key, Err(ReplicateError::MissingKey)));

        let missing_version = node.handle_replicate(ReplicateInput {
            key: "k".into(),
            value: Bytes::from("v"),
            version: 0,
        });
        assert!(matches!(missing_version, Err(ReplicateError::MissingVersion)));
        assert!(node.handle_dump().is_empty());
    }

    #[test]
    fn read_validation_and_miss() {
        let node = follower();
        assert!(matches!(
            node.handle_read(ReadInput { key: "".into() }),
            Err(ReadError::MissingKey)
        ));
        assert_eq!(read(&node, "absent"), None);
    }

    #[test]
    fn health_reports_role() {
        assert_eq!(follower().handle_health().role, Role::Follower);

        let health = leader(vec![Script::Ack], 1).handle_health();
        assert_eq!(health.role, Role::Leader);
        assert_eq!(health.node_id, NodeId::new("leader".into()));
    }
}
