mod version;
mod versioned_store;

pub(crate) use version::Version;
pub(crate) use version::VersionAllocator;
pub(crate) use versioned_store::Entry;
pub(crate) use versioned_store::VersionedStore;
