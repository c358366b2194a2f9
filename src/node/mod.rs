mod node;
mod node_api;

pub(crate) use node::KvNode;
pub(crate) use node::NodeId;
pub(crate) use node_api::HealthOutput;
pub(crate) use node_api::ReadError;
pub(crate) use node_api::ReadInput;
pub(crate) use node_api::ReplicateError;
pub(crate) use node_api::ReplicateInput;
pub(crate) use node_api::ReplicateOutput;
pub(crate) use node_api::Role;
pub(crate) use node_api::WriteError;
pub(crate) use node_api::WriteInput;
pub(crate) use node_api::WriteOutput;
