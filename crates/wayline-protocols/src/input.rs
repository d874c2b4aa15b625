//! Inputs and results exchanged along the interceptor chains.

use std::sync::Arc;

use crate::context::{AmbientContext, Sandbox};
use crate::payload::Headers;
use crate::value::Value;

/// Identity of a running workflow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInfo {
    pub workflow_type: String,
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowInfo {
    pub fn new(
        workflow_type: impl Into<String>,
        workflow_id: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }
}

/// An activity invocation arriving at a worker.
#[derive(Debug, Clone)]
pub struct ExecuteActivityInput {
    pub activity_type: String,
    pub args: Vec<Value>,
    pub headers: Headers,
    pub context: AmbientContext,
}

impl ExecuteActivityInput {
    pub fn new(activity_type: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            activity_type: activity_type.into(),
            args,
            headers: Headers::new(),
            context: AmbientContext::new(),
        }
    }
}

/// A workflow run arriving at a worker.
#[derive(Debug, Clone)]
pub struct ExecuteWorkflowInput {
    pub workflow_type: String,
    pub args: Vec<Value>,
    pub headers: Headers,
    pub context: AmbientContext,
    pub sandbox: Arc<Sandbox>,
}

impl ExecuteWorkflowInput {
    pub fn new(workflow_type: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            args,
            headers: Headers::new(),
            context: AmbientContext::new(),
            sandbox: Arc::new(Sandbox::new()),
        }
    }

    pub fn with_sandbox(mut self, sandbox: Arc<Sandbox>) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Scheduling of an activity from workflow code.
#[derive(Debug, Clone)]
pub struct StartActivityInput {
    pub activity_type: String,
    pub args: Vec<Value>,
    pub headers: Headers,
}

impl StartActivityInput {
    pub fn new(activity_type: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            activity_type: activity_type.into(),
            args,
            headers: Headers::new(),
        }
    }
}

/// Scheduling of a local activity from workflow code.
#[derive(Debug, Clone)]
pub struct StartLocalActivityInput {
    pub activity_type: String,
    pub args: Vec<Value>,
    pub headers: Headers,
}

impl StartLocalActivityInput {
    pub fn new(activity_type: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            activity_type: activity_type.into(),
            args,
            headers: Headers::new(),
        }
    }
}

/// Start of a child workflow from workflow code.
///
/// Headers start out absent; the first interceptor that writes one creates
/// the map.
#[derive(Debug, Clone)]
pub struct StartChildWorkflowInput {
    pub workflow_type: String,
    pub workflow_id: String,
    pub args: Vec<Value>,
    pub headers: Option<Headers>,
}

impl StartChildWorkflowInput {
    pub fn new(
        workflow_type: impl Into<String>,
        workflow_id: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            workflow_id: workflow_id.into(),
            args,
            headers: None,
        }
    }
}

/// Signal sent to a child workflow of the current workflow.
#[derive(Debug, Clone)]
pub struct SignalChildWorkflowInput {
    pub child_workflow_id: String,
    pub signal: String,
    pub args: Vec<Value>,
    pub headers: Headers,
}

impl SignalChildWorkflowInput {
    pub fn new(
        child_workflow_id: impl Into<String>,
        signal: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            child_workflow_id: child_workflow_id.into(),
            signal: signal.into(),
            args,
            headers: Headers::new(),
        }
    }
}

/// Signal sent to any workflow by id.
#[derive(Debug, Clone)]
pub struct SignalExternalWorkflowInput {
    pub workflow_id: String,
    pub run_id: Option<String>,
    pub signal: String,
    pub args: Vec<Value>,
    pub headers: Headers,
}

impl SignalExternalWorkflowInput {
    pub fn new(workflow_id: impl Into<String>, signal: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            run_id: None,
            signal: signal.into(),
            args,
            headers: Headers::new(),
        }
    }
}

/// Handle to a scheduled activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityHandle {
    pub activity_id: String,
    pub activity_type: String,
}

/// Handle to a started child workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildWorkflowHandle {
    pub workflow_id: String,
    pub workflow_type: String,
}
