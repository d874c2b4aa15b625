//! Reserved carrier and header keys.
//!
//! These strings are the on-wire contract between a parent execution and the
//! activities and child workflows it starts. Changing any of them breaks
//! propagation between workers running different versions.

/// Argument map key whose value is the propagated metadata mapping.
pub const METADATA_CONTEXT_KEY: &str = "zamp_metadata_context";

/// Single-entry argument map key carrying the root workflow name.
pub const ROOT_WORKFLOW_NAME_KEY: &str = "__temporal_root_workflow_name";

/// Header entry the root workflow name is moved into.
pub const ROOT_WORKFLOW_NAME_HEADER: &str = "root_workflow_name";

/// Single-entry argument map key carrying the node id of an action.
pub const NODE_ID_KEY: &str = "__temporal_node_id";

/// Default header entry the node id is moved into.
pub const NODE_ID_HEADER: &str = "node_id";
