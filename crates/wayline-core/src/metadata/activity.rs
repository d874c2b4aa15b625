//! Activity side of metadata propagation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use wayline_protocols::{
    ActivityInbound, ActivityNext, ContextBinder, ExecuteActivityInput, ExecutionError, Value,
};

use super::extract::extract_metadata;

/// Binds carried metadata into the activity's ambient context.
///
/// Every key is bound independently: a key the binder refuses is logged and
/// skipped, and the activity still runs.
pub struct MetadataContextActivityInbound {
    binder: Arc<dyn ContextBinder>,
}

impl MetadataContextActivityInbound {
    pub fn new(binder: Arc<dyn ContextBinder>) -> Self {
        Self { binder }
    }
}

#[async_trait]
impl ActivityInbound for MetadataContextActivityInbound {
    async fn execute_activity(
        &self,
        mut input: ExecuteActivityInput,
        next: ActivityNext<'_>,
    ) -> Result<Value, ExecutionError> {
        if let Some(metadata) = extract_metadata(&input.args) {
            debug!(
                activity = %input.activity_type,
                metadata_keys = ?metadata.keys().collect::<Vec<_>>(),
                "Binding metadata context for activity"
            );
            for (key, value) in metadata {
                if let Err(e) = self.binder.bind(&mut input.context, key, value) {
                    error!(
                        interceptor = "metadata_context",
                        key = %key,
                        error = %e,
                        "Error binding metadata context variable"
                    );
                }
            }
        }

        next.run(input).await
    }
}
