use crate::replication::{
    FollowerCallError, FollowerClient, FollowerId, ReplicaAcceptor, ReplicateRequest, ReplicationClient,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::Duration;

pub(crate) fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// How a scripted follower answers every replicate call.
pub(crate) enum Script {
    Ack,
    Fail,
    /// Never answers.
    Hang,
    /// Answers once released.
    Gate(Arc<Notify>),
}

#[derive(Clone, Default)]
pub(crate) struct CallCounters {
    calls: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl CallCounters {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

struct ScriptedFollower {
    script: Script,
    counters: CallCounters,
}

#[async_trait::async_trait]
impl FollowerClient for ScriptedFollower {
    async fn replicate(&self, _: ReplicateRequest) -> Result<bool, FollowerCallError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.script {
            Script::Ack => Ok(true),
            Script::Fail => Err(FollowerCallError::Rpc(tonic::Status::unavailable("down"))),
            Script::Hang => hang_forever().await,
            Script::Gate(notify) => {
                notify.notified().await;
                Ok(true)
            }
        };
        self.counters.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

async fn hang_forever() -> Result<bool, FollowerCallError> {
    std::future::pending::<()>().await;
    unreachable!()
}

/// One `ReplicationClient` per script, with no simulated delay.
pub(crate) fn scripted_followers(scripts: Vec<Script>, counters: &CallCounters) -> Vec<ReplicationClient> {
    scripts
        .into_iter()
        .enumerate()
        .map(|(i, script)| {
            let transport = Arc::new(ScriptedFollower {
                script,
                counters: counters.clone(),
            });
            ReplicationClient::new(
                test_logger(),
                FollowerId::new(format!("follower-{}", i + 1)),
                transport,
                Duration::from_millis(0),
                Duration::from_millis(0),
            )
        })
        .collect()
}

/// Poll `condition` until it holds. Panics after 5s.
pub(crate) async fn wait_until<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Condition not met before sanity timeout")
}

/// Delivers replicated writes straight to a follower's acceptor in the same process.
pub(crate) struct InProcessFollowerClient {
    acceptor: Arc<ReplicaAcceptor>,
}

impl InProcessFollowerClient {
    pub(crate) fn new(acceptor: Arc<ReplicaAcceptor>) -> Self {
        InProcessFollowerClient { acceptor }
    }
}

#[async_trait::async_trait]
impl FollowerClient for InProcessFollowerClient {
    async fn replicate(&self, request: ReplicateRequest) -> Result<bool, FollowerCallError> {
        Ok(self.acceptor.on_replicate(request))
    }
}
