//! Cursors over the remaining links of a chain.
//!
//! A chain is an ordered slice of hooks plus a terminal. Each hook receives a
//! cursor positioned just after itself; calling the cursor hands control to
//! the following hook, or to the terminal once the slice is exhausted.

use std::sync::Arc;

use super::traits::{
    ActivityExecutor, ActivityInbound, OutboundRuntime, WorkflowExecutor, WorkflowInbound,
    WorkflowOutbound,
};
use crate::error::ExecutionError;
use crate::input::{
    ActivityHandle, ChildWorkflowHandle, ExecuteActivityInput, ExecuteWorkflowInput,
    SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput,
};
use crate::value::Value;

/// Remainder of an activity chain.
#[derive(Clone, Copy)]
pub struct ActivityNext<'a> {
    rest: &'a [Arc<dyn ActivityInbound>],
    terminal: &'a dyn ActivityExecutor,
}

impl<'a> ActivityNext<'a> {
    pub fn new(rest: &'a [Arc<dyn ActivityInbound>], terminal: &'a dyn ActivityExecutor) -> Self {
        Self { rest, terminal }
    }

    /// Number of hooks still ahead of the terminal.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    pub async fn run(self, input: ExecuteActivityInput) -> Result<Value, ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.execute_activity(input, ActivityNext::new(rest, self.terminal))
                    .await
            }
            None => self.terminal.execute(input).await,
        }
    }
}

/// Remainder of a workflow chain.
#[derive(Clone, Copy)]
pub struct WorkflowNext<'a> {
    rest: &'a [Arc<dyn WorkflowInbound>],
    terminal: &'a dyn WorkflowExecutor,
    outbound: &'a Arc<dyn OutboundRuntime>,
}

impl<'a> WorkflowNext<'a> {
    pub fn new(
        rest: &'a [Arc<dyn WorkflowInbound>],
        terminal: &'a dyn WorkflowExecutor,
        outbound: &'a Arc<dyn OutboundRuntime>,
    ) -> Self {
        Self {
            rest,
            terminal,
            outbound,
        }
    }

    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    pub async fn run(self, input: ExecuteWorkflowInput) -> Result<Value, ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.execute_workflow(input, WorkflowNext::new(rest, self.terminal, self.outbound))
                    .await
            }
            None => self.terminal.execute(input, Arc::clone(self.outbound)).await,
        }
    }
}

/// Remainder of an outbound chain.
#[derive(Clone, Copy)]
pub struct OutboundNext<'a> {
    rest: &'a [Arc<dyn WorkflowOutbound>],
    runtime: &'a dyn OutboundRuntime,
}

impl<'a> OutboundNext<'a> {
    pub fn new(rest: &'a [Arc<dyn WorkflowOutbound>], runtime: &'a dyn OutboundRuntime) -> Self {
        Self { rest, runtime }
    }

    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    pub async fn start_activity(
        self,
        input: StartActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.start_activity(input, OutboundNext::new(rest, self.runtime))
                    .await
            }
            None => self.runtime.start_activity(input).await,
        }
    }

    pub async fn start_local_activity(
        self,
        input: StartLocalActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.start_local_activity(input, OutboundNext::new(rest, self.runtime))
                    .await
            }
            None => self.runtime.start_local_activity(input).await,
        }
    }

    pub async fn start_child_workflow(
        self,
        input: StartChildWorkflowInput,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.start_child_workflow(input, OutboundNext::new(rest, self.runtime))
                    .await
            }
            None => self.runtime.start_child_workflow(input).await,
        }
    }

    pub async fn signal_child_workflow(
        self,
        input: SignalChildWorkflowInput,
    ) -> Result<(), ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.signal_child_workflow(input, OutboundNext::new(rest, self.runtime))
                    .await
            }
            None => self.runtime.signal_child_workflow(input).await,
        }
    }

    pub async fn signal_external_workflow(
        self,
        input: SignalExternalWorkflowInput,
    ) -> Result<(), ExecutionError> {
        match self.rest.split_first() {
            Some((head, rest)) => {
                head.signal_external_workflow(input, OutboundNext::new(rest, self.runtime))
                    .await
            }
            None => self.runtime.signal_external_workflow(input).await,
        }
    }
}
