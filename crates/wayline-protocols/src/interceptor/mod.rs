//! Interceptor hook traits and chain cursors.

mod next;
mod traits;

pub use next::{ActivityNext, OutboundNext, WorkflowNext};
pub use traits::{
    ActivityExecutor, ActivityInbound, Interceptor, OutboundRuntime, WorkflowExecutor,
    WorkflowInbound, WorkflowOutbound,
};
