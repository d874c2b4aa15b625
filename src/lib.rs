//! # Wayline
//!
//! Context propagation interceptors for durable workflow workers.
//!
//! Ambient metadata and the root workflow name flow from a parent workflow
//! to the activities and child workflows it starts without appearing in any
//! business function signature. A worker installs the interceptors through
//! an [`InterceptorStack`], usually built from configuration with
//! [`build_stack`].

pub mod commands;
mod error;

use std::sync::Arc;

pub use error::{Result, WaylineError};
pub use wayline_config::{Config, ConfigLoader, ConfigValidator, InterceptorsConfig};
pub use wayline_core::{
    CodecStrategy, DefaultBinder, InterceptorStack, JsonPayloadConverter,
    MetadataContextInterceptor, NodeIdInterceptor, RootWorkflowNameInterceptor,
    is_serialize_by_default_serializer, select_codec,
};
pub use wayline_protocols::{ContextBinder, PayloadConverter, Value};

/// Build the interceptor stack a worker runs with.
///
/// Enabled interceptors are installed in a fixed order: metadata context
/// outermost, then root workflow name, then node id.
pub fn build_stack(config: &Config, binder: Arc<dyn ContextBinder>) -> InterceptorStack {
    let interceptors = &config.interceptors;
    let converter: Arc<dyn PayloadConverter> = Arc::new(JsonPayloadConverter::new());
    let mut stack = InterceptorStack::new();

    if interceptors.metadata_context {
        stack.push(Arc::new(MetadataContextInterceptor::new(binder)));
    }
    if interceptors.root_workflow_name {
        stack.push(Arc::new(RootWorkflowNameInterceptor::new(Arc::clone(
            &converter,
        ))));
    }
    if interceptors.node_id {
        stack.push(Arc::new(NodeIdInterceptor::with_header(
            converter,
            interceptors.node_id_header_key.clone(),
        )));
    }

    stack
}
