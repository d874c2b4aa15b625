//! Workflow side of metadata propagation.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, error};
use wayline_protocols::{
    ActivityHandle, ChildWorkflowHandle, ContextBinder, ExecuteWorkflowInput, ExecutionError,
    Map, OutboundNext, SignalChildWorkflowInput, SignalExternalWorkflowInput, StartActivityInput,
    StartChildWorkflowInput, StartLocalActivityInput, Value, WorkflowInbound, WorkflowInfo,
    WorkflowNext, WorkflowOutbound,
};

use super::extract::{extract_metadata, merge_metadata};

/// Read access to the metadata stored by a workflow instance.
pub type MetadataGetter = Arc<dyn Fn() -> Map + Send + Sync>;

/// Per-instance workflow hook.
///
/// Captures the metadata carried by the workflow's own arguments, binds it
/// into the ambient context and hands it to the paired outbound hook so
/// every outbound call re-carries it.
pub struct MetadataContextWorkflowInbound {
    binder: Arc<dyn ContextBinder>,
    workflow_id: String,
    metadata: Arc<RwLock<Map>>,
    outbound: Arc<MetadataContextWorkflowOutbound>,
}

impl MetadataContextWorkflowInbound {
    pub fn new(binder: Arc<dyn ContextBinder>, info: &WorkflowInfo) -> Self {
        let metadata = Arc::new(RwLock::new(Map::new()));
        let store = Arc::clone(&metadata);
        let getter: MetadataGetter = Arc::new(move || store.read().clone());

        Self {
            binder,
            workflow_id: info.workflow_id.clone(),
            metadata,
            outbound: Arc::new(MetadataContextWorkflowOutbound::new(getter)),
        }
    }

    /// Snapshot of the metadata captured so far.
    pub fn metadata(&self) -> Map {
        self.metadata.read().clone()
    }

    /// Binds every entry, stopping at the first refusal.
    fn bind_all(&self, input: &mut ExecuteWorkflowInput, metadata: &Map) {
        let _relaxed = input.sandbox.relax();
        let result = metadata
            .iter()
            .try_for_each(|(key, value)| self.binder.bind(&mut input.context, key, value));

        if let Err(e) = result {
            error!(
                interceptor = "metadata_context",
                workflow_id = %self.workflow_id,
                error = %e,
                "Error binding metadata context variables"
            );
        }
    }
}

#[async_trait]
impl WorkflowInbound for MetadataContextWorkflowInbound {
    fn outbound(&self) -> Option<Arc<dyn WorkflowOutbound>> {
        Some(self.outbound.clone())
    }

    async fn execute_workflow(
        &self,
        mut input: ExecuteWorkflowInput,
        next: WorkflowNext<'_>,
    ) -> Result<Value, ExecutionError> {
        if let Some(found) = extract_metadata(&input.args) {
            debug!(
                workflow_id = %self.workflow_id,
                metadata_keys = ?found.keys().collect::<Vec<_>>(),
                "Found metadata context in workflow args"
            );
            *self.metadata.write() = found.clone();
        }

        let metadata = self.metadata();
        if !metadata.is_empty() {
            self.bind_all(&mut input, &metadata);
        }

        next.run(input).await
    }
}

/// Per-instance outbound hook.
///
/// Merges the instance's stored metadata into the arguments of every
/// outbound call. The store is read at call time, never at construction.
pub struct MetadataContextWorkflowOutbound {
    get_metadata: MetadataGetter,
}

impl MetadataContextWorkflowOutbound {
    pub fn new(get_metadata: MetadataGetter) -> Self {
        Self { get_metadata }
    }

    fn inject(&self, args: &mut Vec<Value>) {
        merge_metadata(args, &(self.get_metadata)());
    }
}

#[async_trait]
impl WorkflowOutbound for MetadataContextWorkflowOutbound {
    async fn start_activity(
        &self,
        mut input: StartActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        self.inject(&mut input.args);
        next.start_activity(input).await
    }

    async fn start_local_activity(
        &self,
        mut input: StartLocalActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        self.inject(&mut input.args);
        next.start_local_activity(input).await
    }

    async fn start_child_workflow(
        &self,
        mut input: StartChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        self.inject(&mut input.args);
        next.start_child_workflow(input).await
    }

    async fn signal_child_workflow(
        &self,
        mut input: SignalChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<(), ExecutionError> {
        self.inject(&mut input.args);
        next.signal_child_workflow(input).await
    }

    async fn signal_external_workflow(
        &self,
        mut input: SignalExternalWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<(), ExecutionError> {
        self.inject(&mut input.args);
        next.signal_external_workflow(input).await
    }
}
