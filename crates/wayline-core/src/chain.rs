//! Composed interceptor chains.
//!
//! Each chain owns an ordered list of hooks and the terminal that runs the
//! real work. The first hook is the outermost: it sees the input first and
//! the result last.

use std::sync::Arc;

use async_trait::async_trait;
use wayline_protocols::{
    ActivityExecutor, ActivityHandle, ActivityInbound, ActivityNext, ChildWorkflowHandle,
    ExecuteActivityInput, ExecuteWorkflowInput, ExecutionError, OutboundNext, OutboundRuntime,
    SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput, Value, WorkflowExecutor, WorkflowInbound,
    WorkflowNext, WorkflowOutbound,
};

/// Activity hooks in front of an activity executor.
pub struct ActivityChain {
    links: Vec<Arc<dyn ActivityInbound>>,
    terminal: Arc<dyn ActivityExecutor>,
}

impl ActivityChain {
    pub fn new(links: Vec<Arc<dyn ActivityInbound>>, terminal: Arc<dyn ActivityExecutor>) -> Self {
        Self { links, terminal }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub async fn execute(&self, input: ExecuteActivityInput) -> Result<Value, ExecutionError> {
        ActivityNext::new(&self.links, self.terminal.as_ref())
            .run(input)
            .await
    }
}

/// Outbound hooks in front of the host runtime.
///
/// Implements [`OutboundRuntime`] itself, so workflow code cannot tell a
/// composed chain from the bare runtime.
pub struct OutboundChain {
    links: Vec<Arc<dyn WorkflowOutbound>>,
    runtime: Arc<dyn OutboundRuntime>,
}

impl OutboundChain {
    pub fn new(links: Vec<Arc<dyn WorkflowOutbound>>, runtime: Arc<dyn OutboundRuntime>) -> Self {
        Self { links, runtime }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn next(&self) -> OutboundNext<'_> {
        OutboundNext::new(&self.links, self.runtime.as_ref())
    }
}

#[async_trait]
impl OutboundRuntime for OutboundChain {
    async fn start_activity(
        &self,
        input: StartActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        self.next().start_activity(input).await
    }

    async fn start_local_activity(
        &self,
        input: StartLocalActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        self.next().start_local_activity(input).await
    }

    async fn start_child_workflow(
        &self,
        input: StartChildWorkflowInput,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        self.next().start_child_workflow(input).await
    }

    async fn signal_child_workflow(
        &self,
        input: SignalChildWorkflowInput,
    ) -> Result<(), ExecutionError> {
        self.next().signal_child_workflow(input).await
    }

    async fn signal_external_workflow(
        &self,
        input: SignalExternalWorkflowInput,
    ) -> Result<(), ExecutionError> {
        self.next().signal_external_workflow(input).await
    }
}

/// Workflow hooks of one instance in front of a workflow executor.
///
/// The outbound hooks each inbound hook contributes are collected into the
/// [`OutboundChain`] handed to the executor. Each inbound hook wraps the
/// outbound it is given, so the order is reversed: the first hook's outbound
/// sits innermost, next to the runtime.
pub struct WorkflowChain {
    links: Vec<Arc<dyn WorkflowInbound>>,
    terminal: Arc<dyn WorkflowExecutor>,
    outbound: Arc<dyn OutboundRuntime>,
}

impl WorkflowChain {
    pub fn new(
        links: Vec<Arc<dyn WorkflowInbound>>,
        terminal: Arc<dyn WorkflowExecutor>,
        runtime: Arc<dyn OutboundRuntime>,
    ) -> Self {
        let outbound_links: Vec<_> = links
            .iter()
            .rev()
            .filter_map(|link| link.outbound())
            .collect();
        let outbound: Arc<dyn OutboundRuntime> =
            Arc::new(OutboundChain::new(outbound_links, runtime));
        Self {
            links,
            terminal,
            outbound,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The outbound chain this instance's calls go through.
    pub fn outbound(&self) -> Arc<dyn OutboundRuntime> {
        Arc::clone(&self.outbound)
    }

    pub async fn execute(&self, input: ExecuteWorkflowInput) -> Result<Value, ExecutionError> {
        WorkflowNext::new(&self.links, self.terminal.as_ref(), &self.outbound)
            .run(input)
            .await
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod chain_tests;
