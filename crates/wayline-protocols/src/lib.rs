//! # Wayline Protocols
//!
//! Protocol definitions (traits and the dynamic value model) shared by the
//! Wayline interceptors and the host workflow runtime.
//!
//! ## Core Traits
//!
//! - [`ActivityInbound`] - Hook around activity execution
//! - [`WorkflowInbound`] - Hook around workflow execution, per instance
//! - [`WorkflowOutbound`] - Hook around calls a workflow makes outward
//! - [`Interceptor`] - Factory the worker loads to obtain the hooks above
//! - [`ContextBinder`] - Writes ambient context entries, may fail per key
//! - [`PayloadConverter`] - Encodes values for the header channel
//!
//! The orchestration engine itself implements [`ActivityExecutor`],
//! [`WorkflowExecutor`] and [`OutboundRuntime`]; they terminate every chain.

pub mod context;
pub mod error;
pub mod input;
pub mod interceptor;
pub mod keys;
pub mod payload;
pub mod schema;
pub mod value;

pub use context::{AmbientContext, ContextBinder, Sandbox, SandboxRelaxation};
pub use error::{BindError, ExecutionError, PayloadError};
pub use input::{
    ActivityHandle, ChildWorkflowHandle, ExecuteActivityInput, ExecuteWorkflowInput,
    SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput, WorkflowInfo,
};
pub use interceptor::{
    ActivityExecutor, ActivityInbound, ActivityNext, Interceptor, OutboundNext, OutboundRuntime,
    WorkflowExecutor, WorkflowInbound, WorkflowNext, WorkflowOutbound,
};
pub use payload::{Headers, Payload, PayloadConverter};
pub use schema::{FieldDef, FieldType, ModelSchema, ModelValue};
pub use value::{Map, Value, ValueKind};
