use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wayline_protocols::{
    ActivityHandle, ActivityInbound, ActivityNext, ExecuteActivityInput, ExecuteWorkflowInput,
    ExecutionError, OutboundNext, OutboundRuntime, StartActivityInput, Value, WorkflowInbound,
    WorkflowNext, WorkflowOutbound,
};

use super::*;
use crate::test_support::{CallingWorkflow, ContextEcho, OutboundCall, RecordingRuntime};

struct Stamp {
    key: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl ActivityInbound for Stamp {
    async fn execute_activity(
        &self,
        mut input: ExecuteActivityInput,
        next: ActivityNext<'_>,
    ) -> Result<Value, ExecutionError> {
        self.order.lock().push(self.key);
        input.context.insert(self.key, Value::from(true));
        next.run(input).await
    }
}

struct ShortCircuit;

#[async_trait]
impl ActivityInbound for ShortCircuit {
    async fn execute_activity(
        &self,
        _input: ExecuteActivityInput,
        _next: ActivityNext<'_>,
    ) -> Result<Value, ExecutionError> {
        Err(ExecutionError::Cancelled)
    }
}

struct ArgAppender(&'static str);

#[async_trait]
impl WorkflowOutbound for ArgAppender {
    async fn start_activity(
        &self,
        mut input: StartActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        input.args.push(Value::from(self.0));
        next.start_activity(input).await
    }
}

struct WithOutbound(&'static str);

#[async_trait]
impl WorkflowInbound for WithOutbound {
    fn outbound(&self) -> Option<Arc<dyn WorkflowOutbound>> {
        Some(Arc::new(ArgAppender(self.0)))
    }
}

struct InboundOnly;

#[async_trait]
impl WorkflowInbound for InboundOnly {
    async fn execute_workflow(
        &self,
        mut input: ExecuteWorkflowInput,
        next: WorkflowNext<'_>,
    ) -> Result<Value, ExecutionError> {
        input.context.insert("inbound_only", Value::from(1));
        next.run(input).await
    }
}

#[tokio::test]
async fn test_activity_chain_outermost_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let chain = ActivityChain::new(
        vec![
            Arc::new(Stamp {
                key: "outer",
                order: order.clone(),
            }),
            Arc::new(Stamp {
                key: "inner",
                order: order.clone(),
            }),
        ],
        Arc::new(ContextEcho),
    );
    assert_eq!(chain.len(), 2);

    let result = chain
        .execute(ExecuteActivityInput::new("charge", vec![]))
        .await
        .unwrap();

    assert_eq!(*order.lock(), vec!["outer", "inner"]);
    let seen = result.as_map().unwrap();
    assert_eq!(seen.get("outer"), Some(&Value::from(true)));
    assert_eq!(seen.get("inner"), Some(&Value::from(true)));
}

#[tokio::test]
async fn test_activity_chain_link_can_short_circuit() {
    let chain = ActivityChain::new(vec![Arc::new(ShortCircuit)], Arc::new(ContextEcho));
    let result = chain
        .execute(ExecuteActivityInput::new("charge", vec![]))
        .await;
    assert!(matches!(result, Err(ExecutionError::Cancelled)));
}

#[tokio::test]
async fn test_empty_outbound_chain_is_transparent() {
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = OutboundChain::new(vec![], runtime.clone());
    assert!(chain.is_empty());

    chain
        .start_activity(StartActivityInput::new("charge", vec![Value::from(1)]))
        .await
        .unwrap();

    let calls = runtime.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args(), &[Value::from(1)]);
}

#[tokio::test]
async fn test_workflow_chain_wraps_outbound_in_reverse() {
    let runtime = Arc::new(RecordingRuntime::default());
    let workflow = Arc::new(CallingWorkflow::default());
    let chain = WorkflowChain::new(
        vec![
            Arc::new(WithOutbound("a")),
            Arc::new(InboundOnly),
            Arc::new(WithOutbound("b")),
        ],
        workflow.clone(),
        runtime.clone(),
    );
    assert_eq!(chain.len(), 3);

    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![]))
        .await
        .unwrap();

    let ctx = workflow.seen_context.lock().clone().unwrap();
    assert_eq!(ctx.get("inbound_only"), Some(&Value::from(1)));

    let calls = runtime.calls();
    assert_eq!(calls.len(), 5);
    match &calls[0] {
        OutboundCall::Activity(input) => assert_eq!(
            input.args,
            vec![Value::from(10), Value::from("b"), Value::from("a")]
        ),
        other => panic!("unexpected call {other:?}"),
    }
    // Other calls use the default delegation and arrive unchanged.
    assert!(calls[1].args().is_empty());
    assert_eq!(calls[2].args(), &[Value::from("x")]);
}

#[tokio::test]
async fn test_workflow_chain_exposes_outbound() {
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = WorkflowChain::new(
        vec![Arc::new(WithOutbound("z"))],
        Arc::new(CallingWorkflow::default()),
        runtime.clone(),
    );

    chain
        .outbound()
        .start_activity(StartActivityInput::new("direct", vec![]))
        .await
        .unwrap();

    assert_eq!(runtime.calls()[0].args(), &[Value::from("z")]);
}
