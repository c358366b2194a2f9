use crate::api::types::KvEntry;
use std::collections::BTreeMap;

/// How one follower's contents compare to the leader's.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FollowerConsistency {
    pub follower_id: String,
    /// Keys the leader has that the follower doesn't.
    pub missing_keys: Vec<String>,
    /// Keys where the follower holds an older version than the leader.
    pub stale_keys: Vec<String>,
    /// Keys where the follower disagrees with the leader in any other way: a newer version, the
    /// same version with a different value, or a key the leader doesn't have.
    pub diverged_keys: Vec<String>,
}

impl FollowerConsistency {
    pub fn is_consistent(&self) -> bool {
        self.missing_keys.is_empty() && self.stale_keys.is_empty() && self.diverged_keys.is_empty()
    }
}

/// ConsistencyReport compares follower dumps against a leader dump.
///
/// Missing and stale keys are expected while replication is in flight or after a partial success.
/// Diverged keys never are.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConsistencyReport {
    pub followers: Vec<FollowerConsistency>,
}

impl ConsistencyReport {
    pub fn compare(
        leader: &BTreeMap<String, KvEntry>,
        followers: &[(String, BTreeMap<String, KvEntry>)],
    ) -> Self {
        let followers = followers
            .iter()
            .map(|(follower_id, follower)| Self::compare_one(follower_id, leader, follower))
            .collect();

        ConsistencyReport { followers }
    }

    fn compare_one(
        follower_id: &str,
        leader: &BTreeMap<String, KvEntry>,
        follower: &BTreeMap<String, KvEntry>,
    ) -> FollowerConsistency {
        let mut result = FollowerConsistency {
            follower_id: follower_id.to_string(),
            ..FollowerConsistency::default()
        };

        for (key, leader_entry) in leader.iter() {
            match follower.get(key) {
                None => result.missing_keys.push(key.clone()),
                Some(entry) if entry.version < leader_entry.version => result.stale_keys.push(key.clone()),
                Some(entry) if entry != leader_entry => result.diverged_keys.push(key.clone()),
                Some(_) => {}
            }
        }
        for key in follower.keys() {
            if !leader.contains_key(key) {
                result.diverged_keys.push(key.clone());
            }
        }

        result
    }

    pub fn is_consistent(&self) -> bool {
        self.followers.iter().all(FollowerConsistency::is_consistent)
    }

    pub fn inconsistent_followers(&self) -> impl Iterator<Item = &FollowerConsistency> {
        self.followers.iter().filter(|f| !f.is_consistent())
    }
}
