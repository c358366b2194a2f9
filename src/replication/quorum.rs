use crate::replication::{FollowerId, ReplicateRequest, ReplicationClient, ReplicationOutcome};
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum QuorumDecision {
    /// Not enough outcomes observed yet to decide either way.
    Pending,
    Met,
    /// Even if every outstanding attempt succeeded, quorum could not be reached.
    Unreachable,
}

/// QuorumTracker counts replication outcomes for a single write.
#[derive(Debug)]
pub(crate) struct QuorumTracker {
    num_followers: usize,
    write_quorum: usize,
    successes: usize,
    failures: usize,
}

impl QuorumTracker {
    pub(crate) fn new(num_followers: usize, write_quorum: usize) -> Self {
        QuorumTracker {
            num_followers,
            write_quorum,
            successes: 0,
            failures: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: &ReplicationOutcome) -> QuorumDecision {
        match outcome {
            ReplicationOutcome::Success => self.successes += 1,
            ReplicationOutcome::Failure(_) => self.failures += 1,
        }

        self.decision()
    }

    pub(crate) fn decision(&self) -> QuorumDecision {
        if self.successes >= self.write_quorum {
            QuorumDecision::Met
        } else if self.successes + self.pending() < self.write_quorum {
            QuorumDecision::Unreachable
        } else {
            QuorumDecision::Pending
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.num_followers.saturating_sub(self.successes + self.failures)
    }

    pub(crate) fn successes(&self) -> usize {
        self.successes
    }

    pub(crate) fn failures(&self) -> usize {
        self.failures
    }
}

/// QuorumReplicator fans a write out to every follower concurrently and reports whether
/// `write_quorum` of them acknowledged it.
///
/// The caller stops waiting as soon as the answer is known. The attempts themselves are detached
/// tasks and always run to completion, so followers keep converging after the caller has moved on.
pub(crate) struct QuorumReplicator {
    logger: slog::Logger,
    followers: Vec<ReplicationClient>,
    write_quorum: usize,
}

impl QuorumReplicator {
    pub(crate) fn new(logger: slog::Logger, followers: Vec<ReplicationClient>, write_quorum: usize) -> Self {
        debug_assert!(
            write_quorum >= 1 && write_quorum <= followers.len(),
            "Write quorum {} must be in [1, {}]",
            write_quorum,
            followers.len()
        );

        QuorumReplicator {
            logger,
            followers,
            write_quorum,
        }
    }

    pub(crate) fn num_followers(&self) -> usize {
        self.followers.len()
    }

    pub(crate) fn write_quorum(&self) -> usize {
        self.write_quorum
    }

    pub(crate) async fn replicate(&self, request: ReplicateRequest) -> bool {
        let logger = self.logger.new(slog::o!(
            "Key" => request.key.clone(),
            "Version" => request.version.as_u64()
        ));
        let start_time = Instant::now();

        let (tx, mut rx) = mpsc::unbounded_channel::<(FollowerId, ReplicationOutcome)>();
        for follower in self.followers.iter() {
            let follower = follower.clone();
            let request = request.clone();
            let tx = tx.clone();
            tokio::task::spawn(async move {
                let outcome = follower.replicate(request).await;
                // Receiver is gone once the write has been decided. That's fine.
                let _ = tx.send((follower.follower_id().clone(), outcome));
            });
        }
        // Only the spawned tasks hold senders now, so `recv()` returns None once they're all done.
        drop(tx);

        let mut tracker = QuorumTracker::new(self.followers.len(), self.write_quorum);
        while let Some((follower_id, outcome)) = rx.recv().await {
            slog::debug!(logger, "Replication outcome from {}: {:?}", follower_id, outcome);

            match tracker.record(&outcome) {
                QuorumDecision::Pending => {}
                QuorumDecision::Met => {
                    slog::info!(
                        logger,
                        "Write quorum met ({}/{}) in {:.2}ms",
                        tracker.successes(),
                        self.write_quorum,
                        start_time.elapsed().as_secs_f64() * 1000.0
                    );
                    return true;
                }
                QuorumDecision::Unreachable => {
                    slog::error!(
                        logger,
                        "Write quorum impossible to reach ({} success, {} failed, {} pending)",
                        tracker.successes(),
                        tracker.failures(),
                        tracker.pending()
                    );
                    return false;
                }
            }
        }

        // Only reachable if an attempt task died without reporting.
        slog::error!(
            logger,
            "Replication tasks exited before quorum was decided ({} success, {} failed)",
            tracker.successes(),
            tracker.failures()
        );
        false
    }
}
