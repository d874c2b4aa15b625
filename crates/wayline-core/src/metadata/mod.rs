//! Metadata context propagation.
//!
//! Metadata travels as a map argument `{"zamp_metadata_context": {...}}`
//! appended to (or merged into) the arguments of every outbound call. On
//! the receiving side the entries are bound into the ambient context before
//! business code runs.

mod activity;
mod extract;
mod workflow;

pub use activity::MetadataContextActivityInbound;
pub use extract::{extract_metadata, merge_metadata};
pub use workflow::{MetadataContextWorkflowInbound, MetadataContextWorkflowOutbound, MetadataGetter};

use std::sync::Arc;

use wayline_protocols::{ActivityInbound, ContextBinder, Interceptor, WorkflowInbound, WorkflowInfo};

/// Interceptor factory for metadata propagation.
pub struct MetadataContextInterceptor {
    binder: Arc<dyn ContextBinder>,
    activity: Arc<MetadataContextActivityInbound>,
}

impl MetadataContextInterceptor {
    pub const NAME: &'static str = "metadata_context";

    pub fn new(binder: Arc<dyn ContextBinder>) -> Self {
        let activity = Arc::new(MetadataContextActivityInbound::new(Arc::clone(&binder)));
        Self { binder, activity }
    }
}

impl Interceptor for MetadataContextInterceptor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn activity_inbound(&self) -> Option<Arc<dyn ActivityInbound>> {
        Some(self.activity.clone())
    }

    fn workflow_inbound(&self, info: &WorkflowInfo) -> Option<Arc<dyn WorkflowInbound>> {
        Some(Arc::new(MetadataContextWorkflowInbound::new(
            Arc::clone(&self.binder),
            info,
        )))
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod metadata_tests;
