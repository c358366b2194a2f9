use crate::replication::{FollowerClient, ReplicateRequest};
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub(crate) struct FollowerId(String);

impl FollowerId {
    pub(crate) fn new(id: String) -> Self {
        FollowerId(id)
    }
}

impl fmt::Display for FollowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one replication attempt to one follower.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReplicationOutcome {
    Success,
    Failure(String),
}

/// ReplicationClient sends a write to one follower after a random delay that models network
/// jitter. There is no timeout on the call itself: a follower that never answers never produces
/// an outcome.
#[derive(Clone)]
pub(crate) struct ReplicationClient {
    logger: slog::Logger,
    follower_id: FollowerId,
    transport: Arc<dyn FollowerClient>,
    delay_range: RangeInclusive<Duration>,
}

impl ReplicationClient {
    pub(crate) fn new(
        logger: slog::Logger,
        follower_id: FollowerId,
        transport: Arc<dyn FollowerClient>,
        min_delay: Duration,
        max_delay: Duration,
    ) -> Self {
        let logger = logger.new(slog::o!("Follower" => follower_id.to_string()));
        ReplicationClient {
            logger,
            follower_id,
            transport,
            delay_range: RangeInclusive::new(min_delay, max_delay),
        }
    }

    pub(crate) fn follower_id(&self) -> &FollowerId {
        &self.follower_id
    }

    pub(crate) async fn replicate(&self, request: ReplicateRequest) -> ReplicationOutcome {
        tokio::time::sleep(self.random_delay()).await;

        slog::debug!(self.logger, "ClientWire - {:?}", request);
        let reply = self.transport.replicate(request).await;
        slog::debug!(self.logger, "ClientWire - {:?}", reply);

        match reply {
            Ok(updated) => {
                if !updated {
                    slog::debug!(self.logger, "Follower already had an equal or newer version");
                }
                ReplicationOutcome::Success
            }
            Err(e) => {
                slog::warn!(self.logger, "Failed to replicate: {}", e);
                ReplicationOutcome::Failure(e.to_string())
            }
        }
    }

    fn random_delay(&self) -> Duration {
        if self.delay_range.start() >= self.delay_range.end() {
            return *self.delay_range.start();
        }
        rand::thread_rng().gen_range(self.delay_range.clone())
    }
}
