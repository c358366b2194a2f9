use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Version is a Lamport style logical timestamp minted by the leader for each accepted write.
/// Versions start at 1. Version 0 is never assigned.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub(crate) struct Version(u64);

impl Version {
    pub(crate) fn new(version: u64) -> Self {
        Version(version)
    }

    pub(crate) fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// VersionAllocator hands out strictly increasing versions. Only the leader owns one.
///
/// It is not persisted. A restarted leader starts again from 1, so monotonicity only holds for
/// the lifetime of the process.
pub(crate) struct VersionAllocator {
    last_assigned: AtomicU64,
}

impl VersionAllocator {
    pub(crate) fn new() -> Self {
        VersionAllocator {
            last_assigned: AtomicU64::new(0),
        }
    }

    pub(crate) fn next_version(&self) -> Version {
        // fetch_add returns the previous value.
        Version::new(self.last_assigned.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn first_version_is_one() {
        let allocator = VersionAllocator::new();
        assert_eq!(allocator.next_version(), Version::new(1));
        assert_eq!(allocator.next_version(), Version::new(2));
    }

    #[test]
    fn sequential_versions_strictly_increase() {
        let allocator = VersionAllocator::new();
        let mut previous = allocator.next_version();
        for _ in 0..1000 {
            let next = allocator.next_version();
            assert!(next > previous, "{:?} should be > {:?}", next, previous);
            previous = next;
        }
    }

    #[test]
    fn concurrent_callers_never_share_a_version() {
        let allocator = Arc::new(VersionAllocator::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let allocator = allocator.clone();
            handles.push(std::thread::spawn(move || {
                (0..500).map(|_| allocator.next_version()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            let versions = handle.join().unwrap();
            // Each thread observes its own versions in increasing order.
            assert!(versions.windows(2).all(|w| w[0] < w[1]));
            for v in versions {
                assert!(seen.insert(v), "Version {:?} assigned twice", v);
            }
        }

        assert_eq!(seen.len(), 8 * 500);
        assert_eq!(allocator.next_version(), Version::new(8 * 500 + 1));
    }
}
