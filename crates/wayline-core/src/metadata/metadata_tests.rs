use std::sync::Arc;

use wayline_protocols::keys::METADATA_CONTEXT_KEY;
use wayline_protocols::{
    AmbientContext, ExecuteActivityInput, ExecuteWorkflowInput, Map, OutboundRuntime,
    StartActivityInput, Value, WorkflowInfo,
};

use super::*;
use crate::binder::DefaultBinder;
use crate::chain::{ActivityChain, WorkflowChain};
use crate::test_support::{
    CallingWorkflow, ContextEcho, OutboundCall, RecordingRuntime, RefusingBinder,
};

fn metadata() -> Map {
    let mut m = Map::new();
    m.insert("tenant_id".to_string(), Value::from("t-1"));
    m.insert("trace_id".to_string(), Value::from("abc"));
    m.insert("region".to_string(), Value::from("eu"));
    m
}

fn carrier() -> Value {
    Value::map([(METADATA_CONTEXT_KEY, Value::Map(metadata()))])
}

fn info() -> WorkflowInfo {
    WorkflowInfo::new("Parent", "wf-1", "run-1")
}

fn activity_chain(binder: Arc<dyn wayline_protocols::ContextBinder>) -> ActivityChain {
    let interceptor = MetadataContextInterceptor::new(binder);
    ActivityChain::new(
        interceptor.activity_inbound().into_iter().collect(),
        Arc::new(ContextEcho),
    )
}

fn workflow_chain(
    interceptor: &MetadataContextInterceptor,
    workflow: Arc<CallingWorkflow>,
    runtime: Arc<RecordingRuntime>,
) -> WorkflowChain {
    WorkflowChain::new(
        interceptor.workflow_inbound(&info()).into_iter().collect(),
        workflow,
        runtime,
    )
}

#[tokio::test]
async fn test_activity_binds_carried_metadata() {
    let chain = activity_chain(Arc::new(DefaultBinder));
    let result = chain
        .execute(ExecuteActivityInput::new(
            "charge",
            vec![Value::from(1), carrier()],
        ))
        .await
        .unwrap();

    assert_eq!(result, Value::Map(metadata()));
}

#[tokio::test]
async fn test_activity_without_carrier_runs_untouched() {
    let chain = activity_chain(Arc::new(DefaultBinder));
    let result = chain
        .execute(ExecuteActivityInput::new("charge", vec![Value::from(1)]))
        .await
        .unwrap();

    assert_eq!(result, Value::Map(Map::new()));
}

#[tokio::test]
async fn test_activity_isolates_binding_failures() {
    let binder = Arc::new(RefusingBinder::new("trace_id"));
    let chain = activity_chain(binder.clone());
    let result = chain
        .execute(ExecuteActivityInput::new("charge", vec![carrier()]))
        .await
        .unwrap();

    let seen = result.as_map().unwrap();
    assert_eq!(seen.get("tenant_id"), Some(&Value::from("t-1")));
    assert_eq!(seen.get("region"), Some(&Value::from("eu")));
    assert!(seen.get("trace_id").is_none());
    assert_eq!(binder.attempts.lock().len(), 3);
}

#[tokio::test]
async fn test_workflow_binds_metadata_with_sandbox_relaxed() {
    let sandbox_seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let seen = sandbox_seen.clone();
    let sandbox = Arc::new(wayline_protocols::Sandbox::new());
    let probe = sandbox.clone();
    let binder = move |ctx: &mut AmbientContext, key: &str, value: &Value| {
        seen.lock().push(probe.is_restricted());
        ctx.insert(key, value.clone());
        Ok::<(), wayline_protocols::BindError>(())
    };

    let interceptor = MetadataContextInterceptor::new(Arc::new(binder));
    let workflow = Arc::new(CallingWorkflow::default());
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = workflow_chain(&interceptor, workflow.clone(), runtime);

    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![carrier()]).with_sandbox(sandbox.clone()))
        .await
        .unwrap();

    assert_eq!(*sandbox_seen.lock(), vec![false, false, false]);
    assert!(sandbox.is_restricted());
    assert_eq!(*workflow.sandbox_restricted.lock(), Some(true));

    let ctx = workflow.seen_context.lock().clone().unwrap();
    assert_eq!(ctx.get("tenant_id"), Some(&Value::from("t-1")));
    assert_eq!(ctx.len(), 3);
}

#[tokio::test]
async fn test_workflow_binding_stops_at_first_refusal() {
    let binder = Arc::new(RefusingBinder::new("trace_id"));
    let interceptor = MetadataContextInterceptor::new(binder.clone());
    let workflow = Arc::new(CallingWorkflow::default());
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = workflow_chain(&interceptor, workflow.clone(), runtime.clone());

    let sandbox = Arc::new(wayline_protocols::Sandbox::new());
    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![carrier()]).with_sandbox(sandbox.clone()))
        .await
        .unwrap();

    // "region" comes after the refused key and is never attempted.
    assert_eq!(*binder.attempts.lock(), vec!["tenant_id", "trace_id"]);
    let ctx = workflow.seen_context.lock().clone().unwrap();
    assert_eq!(ctx.get("tenant_id"), Some(&Value::from("t-1")));
    assert!(!ctx.contains("region"));
    assert!(sandbox.is_restricted());

    // Propagation still carries the full stored metadata.
    let calls = runtime.calls();
    assert_eq!(extract_metadata(calls[0].args()), Some(&metadata()));
}

#[tokio::test]
async fn test_workflow_outbound_carries_metadata_on_every_call() {
    let interceptor = MetadataContextInterceptor::new(Arc::new(DefaultBinder));
    let workflow = Arc::new(CallingWorkflow::default());
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = workflow_chain(&interceptor, workflow, runtime.clone());

    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![carrier()]))
        .await
        .unwrap();

    let calls = runtime.calls();
    assert_eq!(calls.len(), 5);
    for call in &calls {
        assert_eq!(extract_metadata(call.args()), Some(&metadata()), "{call:?}");
    }
    match &calls[0] {
        OutboundCall::Activity(input) => {
            assert_eq!(input.args, vec![Value::from(10), carrier()]);
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[tokio::test]
async fn test_workflow_without_metadata_leaves_calls_untouched() {
    let interceptor = MetadataContextInterceptor::new(Arc::new(DefaultBinder));
    let workflow = Arc::new(CallingWorkflow::default());
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = workflow_chain(&interceptor, workflow.clone(), runtime.clone());

    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![Value::from(1)]))
        .await
        .unwrap();

    let calls = runtime.calls();
    assert_eq!(calls[0].args(), &[Value::from(10)]);
    assert!(calls[1].args().is_empty());
    assert!(workflow.seen_context.lock().clone().unwrap().is_empty());
}

#[tokio::test]
async fn test_workflow_instances_do_not_share_metadata() {
    let interceptor = MetadataContextInterceptor::new(Arc::new(DefaultBinder));

    let first_runtime = Arc::new(RecordingRuntime::default());
    let first = workflow_chain(
        &interceptor,
        Arc::new(CallingWorkflow::default()),
        first_runtime.clone(),
    );
    first
        .execute(ExecuteWorkflowInput::new("Parent", vec![carrier()]))
        .await
        .unwrap();

    let second_runtime = Arc::new(RecordingRuntime::default());
    let second = workflow_chain(
        &interceptor,
        Arc::new(CallingWorkflow::default()),
        second_runtime.clone(),
    );
    second
        .execute(ExecuteWorkflowInput::new("Parent", vec![]))
        .await
        .unwrap();

    assert!(extract_metadata(first_runtime.calls()[0].args()).is_some());
    assert!(extract_metadata(second_runtime.calls()[0].args()).is_none());
}

#[tokio::test]
async fn test_outbound_reads_store_at_call_time() {
    let store = Arc::new(parking_lot::RwLock::new(Map::new()));
    let reader = store.clone();
    let outbound = MetadataContextWorkflowOutbound::new(Arc::new(move || reader.read().clone()));
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = crate::chain::OutboundChain::new(vec![Arc::new(outbound)], runtime.clone());

    chain
        .start_activity(StartActivityInput::new("a", vec![]))
        .await
        .unwrap();
    *store.write() = metadata();
    chain
        .start_activity(StartActivityInput::new("b", vec![]))
        .await
        .unwrap();

    let calls = runtime.calls();
    assert!(calls[0].args().is_empty());
    assert_eq!(calls[1].args(), &[carrier()]);
}

#[tokio::test]
async fn test_caller_supplied_carrier_is_updated_not_duplicated() {
    let interceptor = MetadataContextInterceptor::new(Arc::new(DefaultBinder));
    let inbound = interceptor.workflow_inbound(&info()).unwrap();
    let runtime = Arc::new(RecordingRuntime::default());
    let chain = WorkflowChain::new(
        vec![inbound],
        Arc::new(CallingWorkflow::default()),
        runtime.clone(),
    );
    chain
        .execute(ExecuteWorkflowInput::new("Parent", vec![carrier()]))
        .await
        .unwrap();

    let mut partial = Map::new();
    partial.insert("tenant_id".to_string(), Value::from("stale"));
    chain
        .outbound()
        .start_activity(StartActivityInput::new(
            "charge",
            vec![Value::map([(METADATA_CONTEXT_KEY, Value::Map(partial))])],
        ))
        .await
        .unwrap();

    let calls = runtime.calls();
    let last = calls.last().unwrap();
    assert_eq!(last.args(), &[carrier()]);
}
