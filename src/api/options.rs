use tokio::time::Duration;

/// Tunables for a node. Unset fields fall back to defaults. Only leaders use these.
#[derive(Clone, Default)]
pub struct KvOptions {
    /// Number of follower acknowledgments a write needs to report `WriteStatus::Success`.
    /// Defaults to a majority of the followers.
    pub write_quorum: Option<usize>,
    /// Lower bound of the simulated network delay before each replication call.
    pub min_replication_delay: Option<Duration>,
    /// Upper bound of the simulated network delay before each replication call.
    pub max_replication_delay: Option<Duration>,
}

#[derive(Debug)]
pub(super) struct KvOptionsValidated {
    pub write_quorum: usize,
    pub min_replication_delay: Duration,
    pub max_replication_delay: Duration,
}

impl KvOptionsValidated {
    pub(super) fn try_from_options(options: KvOptions, num_followers: usize) -> Result<Self, String> {
        let values = KvOptionsValidated {
            write_quorum: options
                .write_quorum
                .unwrap_or_else(|| Self::majority_of(num_followers)),
            min_replication_delay: options
                .min_replication_delay
                .unwrap_or(Duration::from_micros(100)),
            max_replication_delay: options
                .max_replication_delay
                .unwrap_or(Duration::from_millis(1000)),
        };

        values.validate(num_followers)?;
        Ok(values)
    }

    fn majority_of(num_followers: usize) -> usize {
        (num_followers / 2) + 1
    }

    fn validate(&self, num_followers: usize) -> Result<(), String> {
        if self.write_quorum == 0 {
            return Err("Write quorum must be at least 1".to_string());
        }
        if self.write_quorum > num_followers {
            return Err(format!(
                "Write quorum ({}) must not exceed the number of followers ({})",
                self.write_quorum, num_followers
            ));
        }
        if self.min_replication_delay > self.max_replication_delay {
            return Err("Minimum replication delay must not be greater than maximum replication delay".to_string());
        }

        Ok(())
    }
}
