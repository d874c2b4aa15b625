//! Recording terminals shared by the unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wayline_protocols::{
    ActivityExecutor, ActivityHandle, AmbientContext, BindError, ChildWorkflowHandle,
    ContextBinder, ExecuteActivityInput, ExecuteWorkflowInput, ExecutionError, OutboundRuntime,
    SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput, Value, WorkflowExecutor,
};

/// Every call that reached the host runtime.
#[derive(Debug, Clone)]
pub enum OutboundCall {
    Activity(StartActivityInput),
    LocalActivity(StartLocalActivityInput),
    ChildWorkflow(StartChildWorkflowInput),
    SignalChild(SignalChildWorkflowInput),
    SignalExternal(SignalExternalWorkflowInput),
}

impl OutboundCall {
    pub fn args(&self) -> &[Value] {
        match self {
            OutboundCall::Activity(i) => &i.args,
            OutboundCall::LocalActivity(i) => &i.args,
            OutboundCall::ChildWorkflow(i) => &i.args,
            OutboundCall::SignalChild(i) => &i.args,
            OutboundCall::SignalExternal(i) => &i.args,
        }
    }
}

#[derive(Default)]
pub struct RecordingRuntime {
    calls: Mutex<Vec<OutboundCall>>,
}

impl RecordingRuntime {
    pub fn calls(&self) -> Vec<OutboundCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl OutboundRuntime for RecordingRuntime {
    async fn start_activity(
        &self,
        input: StartActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        let handle = ActivityHandle {
            activity_id: format!("act-{}", self.calls.lock().len()),
            activity_type: input.activity_type.clone(),
        };
        self.calls.lock().push(OutboundCall::Activity(input));
        Ok(handle)
    }

    async fn start_local_activity(
        &self,
        input: StartLocalActivityInput,
    ) -> Result<ActivityHandle, ExecutionError> {
        let handle = ActivityHandle {
            activity_id: format!("local-{}", self.calls.lock().len()),
            activity_type: input.activity_type.clone(),
        };
        self.calls.lock().push(OutboundCall::LocalActivity(input));
        Ok(handle)
    }

    async fn start_child_workflow(
        &self,
        input: StartChildWorkflowInput,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        let handle = ChildWorkflowHandle {
            workflow_id: input.workflow_id.clone(),
            workflow_type: input.workflow_type.clone(),
        };
        self.calls.lock().push(OutboundCall::ChildWorkflow(input));
        Ok(handle)
    }

    async fn signal_child_workflow(
        &self,
        input: SignalChildWorkflowInput,
    ) -> Result<(), ExecutionError> {
        self.calls.lock().push(OutboundCall::SignalChild(input));
        Ok(())
    }

    async fn signal_external_workflow(
        &self,
        input: SignalExternalWorkflowInput,
    ) -> Result<(), ExecutionError> {
        self.calls.lock().push(OutboundCall::SignalExternal(input));
        Ok(())
    }
}

/// Activity body that returns its ambient context as a map.
pub struct ContextEcho;

#[async_trait]
impl ActivityExecutor for ContextEcho {
    async fn execute(&self, input: ExecuteActivityInput) -> Result<Value, ExecutionError> {
        Ok(context_value(&input.context))
    }
}

pub fn context_value(ctx: &AmbientContext) -> Value {
    Value::Map(ctx.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// Workflow body that records its context and sandbox state, then makes one
/// of each outbound call with fixed arguments.
#[derive(Default)]
pub struct CallingWorkflow {
    pub seen_context: Mutex<Option<AmbientContext>>,
    pub sandbox_restricted: Mutex<Option<bool>>,
}

#[async_trait]
impl WorkflowExecutor for CallingWorkflow {
    async fn execute(
        &self,
        input: ExecuteWorkflowInput,
        outbound: Arc<dyn OutboundRuntime>,
    ) -> Result<Value, ExecutionError> {
        *self.seen_context.lock() = Some(input.context.clone());
        *self.sandbox_restricted.lock() = Some(input.sandbox.is_restricted());

        outbound
            .start_activity(StartActivityInput::new("charge", vec![Value::from(10)]))
            .await?;
        outbound
            .start_local_activity(StartLocalActivityInput::new("lookup", vec![]))
            .await?;
        outbound
            .start_child_workflow(StartChildWorkflowInput::new(
                "Child",
                "child-1",
                vec![Value::from("x")],
            ))
            .await?;
        outbound
            .signal_child_workflow(SignalChildWorkflowInput::new("child-1", "go", vec![]))
            .await?;
        outbound
            .signal_external_workflow(SignalExternalWorkflowInput::new("other", "go", vec![]))
            .await?;
        Ok(Value::Null)
    }
}

/// Binder that refuses one key and records the order of attempts.
pub struct RefusingBinder {
    refused: &'static str,
    pub attempts: Mutex<Vec<String>>,
}

impl RefusingBinder {
    pub fn new(refused: &'static str) -> Self {
        Self {
            refused,
            attempts: Mutex::new(Vec::new()),
        }
    }
}

impl ContextBinder for RefusingBinder {
    fn bind(&self, ctx: &mut AmbientContext, key: &str, value: &Value) -> Result<(), BindError> {
        self.attempts.lock().push(key.to_string());
        if key == self.refused {
            return Err(BindError::rejected(key, "refused"));
        }
        ctx.insert(key, value.clone());
        Ok(())
    }
}
