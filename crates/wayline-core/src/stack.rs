//! Ordered set of interceptor factories a worker runs with.

use std::sync::Arc;

use tracing::debug;
use wayline_protocols::{
    ActivityExecutor, Interceptor, OutboundRuntime, WorkflowExecutor, WorkflowInfo,
};

use crate::chain::{ActivityChain, WorkflowChain};

/// Interceptors in registration order; the first registered is outermost.
#[derive(Default, Clone)]
pub struct InterceptorStack {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor, builder style.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.push(Arc::new(interceptor));
        self
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        debug!("Registering interceptor: {}", interceptor.name());
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Build the chain every activity execution runs through.
    pub fn activity_chain(&self, terminal: Arc<dyn ActivityExecutor>) -> ActivityChain {
        let links = self
            .interceptors
            .iter()
            .filter_map(|i| i.activity_inbound())
            .collect();
        ActivityChain::new(links, terminal)
    }

    /// Build the chain for one new workflow instance.
    ///
    /// Each factory is asked for a fresh inbound hook, so per-instance state
    /// is never shared between instances.
    pub fn workflow_chain(
        &self,
        info: &WorkflowInfo,
        terminal: Arc<dyn WorkflowExecutor>,
        runtime: Arc<dyn OutboundRuntime>,
    ) -> WorkflowChain {
        let links = self
            .interceptors
            .iter()
            .filter_map(|i| i.workflow_inbound(info))
            .collect();
        debug!(
            workflow_id = %info.workflow_id,
            workflow_type = %info.workflow_type,
            "Composed workflow interceptor chain"
        );
        WorkflowChain::new(links, terminal, runtime)
    }
}
