//! This mod is meant to hold most of the code for the library's client-facing API.
mod client;
mod configuration;
mod consistency;
mod node_handle;
mod options;
mod types;
mod wiring;

pub use client::KvClient;
pub use client::KvClientError;
pub use configuration::FollowerInfo;
pub use configuration::KvNodeConfig;
pub use configuration::RoleConfig;
pub use consistency::ConsistencyReport;
pub use consistency::FollowerConsistency;
pub use node_handle::KvNodeHandle;
pub use options::KvOptions;
pub use types::HealthOutput;
pub use types::KvEntry;
pub use types::NodeRole;
pub use types::ReadError;
pub use types::ReplicateError;
pub use types::ReplicateOutput;
pub use types::WriteError;
pub use types::WriteOutput;
pub use types::WriteStatus;
pub use wiring::create_kv_node;
pub use wiring::KvNodeCreationError;
