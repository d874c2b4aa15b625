//! Hook traits per execution kind.

use std::sync::Arc;

use async_trait::async_trait;

use super::next::{ActivityNext, OutboundNext, WorkflowNext};
use crate::error::ExecutionError;
use crate::input::{
    ActivityHandle, ChildWorkflowHandle, ExecuteActivityInput, ExecuteWorkflowInput,
    SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput, WorkflowInfo,
};
use crate::value::Value;

/// Hook around activity execution on a worker.
#[async_trait]
pub trait ActivityInbound: Send + Sync {
    /// Handle the invocation, normally by calling `next.run(input)`.
    async fn execute_activity(
        &self,
        input: ExecuteActivityInput,
        next: ActivityNext<'_>,
    ) -> Result<Value, ExecutionError>;
}

/// Hook around one workflow instance.
///
/// A fresh value is created per instance, so implementations may keep
/// instance state.
#[async_trait]
pub trait WorkflowInbound: Send + Sync {
    /// Outbound hook installed for calls made by this instance.
    fn outbound(&self) -> Option<Arc<dyn WorkflowOutbound>> {
        None
    }

    async fn execute_workflow(
        &self,
        input: ExecuteWorkflowInput,
        next: WorkflowNext<'_>,
    ) -> Result<Value, ExecutionError> {
        next.run(input).await
    }
}

/// Hook around calls a workflow instance makes to the runtime.
///
/// Every method defaults to delegating unchanged.
#[async_trait]
pub trait WorkflowOutbound: Send + Sync {
    async fn start_activity(
        &self,
        input: StartActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        next.start_activity(input).await
    }

    async fn start_local_activity(
        &self,
        input: StartLocalActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        next.start_local_activity(input).await
    }

    async fn start_child_workflow(
        &self,
        input: StartChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        next.start_child_workflow(input).await
    }

    async fn signal_child_workflow(
        &self,
        input: SignalChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<(), ExecutionError> {
        next.signal_child_workflow(input).await
    }

    async fn signal_external_workflow(
        &self,
        input: SignalExternalWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<(), ExecutionError> {
        next.signal_external_workflow(input).await
    }
}

/// Factory the worker loads at startup.
pub trait Interceptor: Send + Sync {
    /// Name used in logs and stack listings.
    fn name(&self) -> &str;

    /// Activity hook, shared by every activity execution.
    fn activity_inbound(&self) -> Option<Arc<dyn ActivityInbound>> {
        None
    }

    /// Workflow hook for one new instance.
    fn workflow_inbound(&self, _info: &WorkflowInfo) -> Option<Arc<dyn WorkflowInbound>> {
        None
    }
}

/// Runs activity business code. Terminates an activity chain.
#[async_trait]
pub trait ActivityExecutor: Send + Sync {
    async fn execute(&self, input: ExecuteActivityInput) -> Result<Value, ExecutionError>;
}

/// Runs workflow business code. Terminates a workflow chain.
///
/// `outbound` is the instance's composed outbound chain; every call the
/// workflow makes must go through it.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    async fn execute(
        &self,
        input: ExecuteWorkflowInput,
        outbound: Arc<dyn OutboundRuntime>,
    ) -> Result<Value, ExecutionError>;
}

/// Calls a workflow can make outward.
///
/// Implemented by the host runtime (terminal) and by composed outbound
/// chains.
#[async_trait]
pub trait OutboundRuntime: Send + Sync {
    async fn start_activity(
        &self,
        input: StartActivityInput,
    ) -> Result<ActivityHandle, ExecutionError>;

    async fn start_local_activity(
        &self,
        input: StartLocalActivityInput,
    ) -> Result<ActivityHandle, ExecutionError>;

    async fn start_child_workflow(
        &self,
        input: StartChildWorkflowInput,
    ) -> Result<ChildWorkflowHandle, ExecutionError>;

    async fn signal_child_workflow(
        &self,
        input: SignalChildWorkflowInput,
    ) -> Result<(), ExecutionError>;

    async fn signal_external_workflow(
        &self,
        input: SignalExternalWorkflowInput,
    ) -> Result<(), ExecutionError>;
}
