mod api;
mod node;
mod replication;
mod server;
mod store;
mod grpc {
    include!("../generated/kv.rs");
}

pub use api::create_kv_node;
pub use api::ConsistencyReport;
pub use api::FollowerConsistency;
pub use api::FollowerInfo;
pub use api::HealthOutput;
pub use api::KvClient;
pub use api::KvClientError;
pub use api::KvEntry;
pub use api::KvNodeConfig;
pub use api::KvNodeCreationError;
pub use api::KvNodeHandle;
pub use api::KvOptions;
pub use api::NodeRole;
pub use api::ReadError;
pub use api::ReplicateError;
pub use api::ReplicateOutput;
pub use api::RoleConfig;
pub use api::WriteError;
pub use api::WriteOutput;
pub use api::WriteStatus;
pub use replication::ConnectError;

// Learning 1: `create::{root_mod}` should not have any code. Just `mod` and `pub use` statements.
// Learning 2: All `mod` statements, anywhere, should not be `pub`. Only export `pub` via individual
//             use statements.
