use crate::replication::ReplicateRequest;
use crate::store::VersionedStore;
use std::sync::Arc;

/// ReplicaAcceptor is the follower side of replication. It is the only writer to a follower's
/// store.
pub(crate) struct ReplicaAcceptor {
    logger: slog::Logger,
    store: Arc<VersionedStore>,
}

impl ReplicaAcceptor {
    pub(crate) fn new(logger: slog::Logger, store: Arc<VersionedStore>) -> Self {
        ReplicaAcceptor { logger, store }
    }

    /// Returns true if the write was applied. A stale version is not an error.
    pub(crate) fn on_replicate(&self, request: ReplicateRequest) -> bool {
        let ReplicateRequest { key, value, version } = request;
        let logger = self
            .logger
            .new(slog::o!("Key" => key.clone(), "Version" => version.as_u64()));

        let updated = self.store.put_if_newer(key, value, version);
        if updated {
            slog::debug!(logger, "Applied replicated write");
        } else {
            slog::debug!(logger, "Ignored stale replicated write");
        }

        updated
    }
}
