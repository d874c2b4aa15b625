//! Single-key argument carriers moved into the header channel.
//!
//! Workflow code marks a value for a child call by passing an argument that
//! is exactly `{key: value}`. The outbound hook strips that argument and
//! writes `value` into a header, so the callee's signature never sees it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use wayline_protocols::keys::{
    NODE_ID_HEADER, NODE_ID_KEY, ROOT_WORKFLOW_NAME_HEADER, ROOT_WORKFLOW_NAME_KEY,
};
use wayline_protocols::{
    ActivityHandle, ChildWorkflowHandle, ExecutionError, Headers, Interceptor, OutboundNext,
    Payload, PayloadConverter, StartActivityInput, StartChildWorkflowInput, Value,
    WorkflowInbound, WorkflowInfo, WorkflowOutbound,
};

/// Whether `arg` is a map with exactly one entry, under `key`.
fn is_carrier(arg: &Value, key: &str) -> bool {
    arg.as_map()
        .is_some_and(|map| map.len() == 1 && map.contains_key(key))
}

/// Value of the first exact carrier for `key`, if it is a non-empty string.
fn carried_value<'a>(args: &'a [Value], key: &str) -> Option<&'a str> {
    args.iter()
        .find(|arg| is_carrier(arg, key))
        .and_then(|arg| arg.as_map())
        .and_then(|map| map.get(key))
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Takes the carried value for `key` out of `args`, encoded for a header.
///
/// Every exact carrier for `key` is removed once the value is encoded.
/// Returns `None` and leaves `args` untouched when there is nothing to move
/// or the value cannot be encoded.
fn take_carried(
    converter: &dyn PayloadConverter,
    key: &str,
    args: &mut Vec<Value>,
) -> Option<Payload> {
    let value = carried_value(args, key)?;

    let payload = match converter.to_payload(&Value::from(value)) {
        Ok(payload) => payload,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to encode carried value for header");
            return None;
        }
    };

    args.retain(|arg| !is_carrier(arg, key));
    Some(payload)
}

/// Inbound hook that only contributes an outbound hook.
struct OutboundInstaller(Arc<dyn WorkflowOutbound>);

#[async_trait]
impl WorkflowInbound for OutboundInstaller {
    fn outbound(&self) -> Option<Arc<dyn WorkflowOutbound>> {
        Some(Arc::clone(&self.0))
    }
}

/// Carries the root workflow name to child workflows.
pub struct RootWorkflowNameOutbound {
    converter: Arc<dyn PayloadConverter>,
}

#[async_trait]
impl WorkflowOutbound for RootWorkflowNameOutbound {
    async fn start_child_workflow(
        &self,
        mut input: StartChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        if let Some(payload) = take_carried(
            self.converter.as_ref(),
            ROOT_WORKFLOW_NAME_KEY,
            &mut input.args,
        ) {
            debug!(header = ROOT_WORKFLOW_NAME_HEADER, "Moving root workflow name into header");
            input
                .headers
                .get_or_insert_with(Headers::new)
                .insert(ROOT_WORKFLOW_NAME_HEADER.to_string(), payload);
        }
        next.start_child_workflow(input).await
    }
}

/// Interceptor factory for root workflow name propagation.
///
/// Only child workflow starts are affected; activities and signals pass
/// through unchanged.
pub struct RootWorkflowNameInterceptor {
    outbound: Arc<RootWorkflowNameOutbound>,
}

impl RootWorkflowNameInterceptor {
    pub const NAME: &'static str = "root_workflow_name";

    pub fn new(converter: Arc<dyn PayloadConverter>) -> Self {
        Self {
            outbound: Arc::new(RootWorkflowNameOutbound { converter }),
        }
    }
}

impl Interceptor for RootWorkflowNameInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn workflow_inbound(&self, _info: &WorkflowInfo) -> Option<Arc<dyn WorkflowInbound>> {
        Some(Arc::new(OutboundInstaller(self.outbound.clone())))
    }
}

/// Carries the node id of an action to the activity or child it starts.
pub struct NodeIdOutbound {
    converter: Arc<dyn PayloadConverter>,
    header: String,
}

#[async_trait]
impl WorkflowOutbound for NodeIdOutbound {
    async fn start_activity(
        &self,
        mut input: StartActivityInput,
        next: OutboundNext<'_>,
    ) -> Result<ActivityHandle, ExecutionError> {
        let carried = take_carried(self.converter.as_ref(), NODE_ID_KEY, &mut input.args);
        if let Some(payload) = carried {
            debug!(header = %self.header, "Moving node id into activity header");
            input.headers.insert(self.header.clone(), payload);
        }
        next.start_activity(input).await
    }

    async fn start_child_workflow(
        &self,
        mut input: StartChildWorkflowInput,
        next: OutboundNext<'_>,
    ) -> Result<ChildWorkflowHandle, ExecutionError> {
        let carried = take_carried(self.converter.as_ref(), NODE_ID_KEY, &mut input.args);
        if let Some(payload) = carried {
            debug!(header = %self.header, "Moving node id into child workflow header");
            input
                .headers
                .get_or_insert_with(Headers::new)
                .insert(self.header.clone(), payload);
        }
        next.start_child_workflow(input).await
    }
}

/// Interceptor factory for node id propagation.
pub struct NodeIdInterceptor {
    outbound: Arc<NodeIdOutbound>,
}

impl NodeIdInterceptor {
    pub const NAME: &'static str = "node_id";

    pub fn new(converter: Arc<dyn PayloadConverter>) -> Self {
        Self::with_header(converter, NODE_ID_HEADER)
    }

    /// Use a header name other than the default `node_id`.
    pub fn with_header(converter: Arc<dyn PayloadConverter>, header: impl Into<String>) -> Self {
        Self {
            outbound: Arc::new(NodeIdOutbound {
                converter,
                header: header.into(),
            }),
        }
    }

    pub fn header(&self) -> &str {
        &self.outbound.header
    }
}

impl Interceptor for NodeIdInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn workflow_inbound(&self, _info: &WorkflowInfo) -> Option<Arc<dyn WorkflowInbound>> {
        Some(Arc::new(OutboundInstaller(self.outbound.clone())))
    }
}

#[cfg(test)]
#[path = "carrier_tests.rs"]
mod carrier_tests;
