use crate::store::Version;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) value: Bytes,
    pub(crate) version: Version,
}

/// VersionedStore is an in-memory map of key to (value, version). Leader and followers each own
/// exactly one.
///
/// All mutation goes through a single coarse lock. Every critical section is O(1) (or a clone
/// for `snapshot()`), and the lock is never held across an await point or a network call.
pub(crate) struct VersionedStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl VersionedStore {
    pub(crate) fn new() -> Self {
        VersionedStore {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Leader-side put. Mint a version with `mint_version` and unconditionally overwrite the entry
    /// for `key`, both while holding the store lock.
    ///
    /// Two concurrent leader writes to the same key therefore apply locally in version order; the
    /// later version always wins on the leader, the same way it wins on followers.
    pub(crate) fn put_with_new_version<F>(&self, key: String, value: Bytes, mint_version: F) -> Version
    where
        F: FnOnce() -> Version,
    {
        let mut entries = self
            .entries
            .lock()
            .expect("VersionedStore.put_with_new_version() mutex guard poison");
        let version = mint_version();
        entries.insert(key, Entry { value, version });

        version
    }

    /// Apply the write iff there is no entry for `key` or `version` is strictly greater than the
    /// stored version. Equal versions are rejected so a retransmitted write is a no-op.
    ///
    /// CAS: Return true if we mutated state.
    pub(crate) fn put_if_newer(&self, key: String, value: Bytes, version: Version) -> bool {
        let mut entries = self
            .entries
            .lock()
            .expect("VersionedStore.put_if_newer() mutex guard poison");

        match entries.get(&key) {
            Some(existing) if version <= existing.version => false,
            _ => {
                entries.insert(key, Entry { value, version });
                true
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<Entry> {
        self.entries
            .lock()
            .expect("VersionedStore.get() mutex guard poison")
            .get(key)
            .cloned()
    }

    /// Copy of the full map, taken under the same lock as writes.
    pub(crate) fn snapshot(&self) -> BTreeMap<String, Entry> {
        self.entries
            .lock()
            .expect("VersionedStore.snapshot() mutex guard poison")
            .iter()
            .map(|(k, e)| (k.clone(), e.clone()))
            .collect()
    }
}
