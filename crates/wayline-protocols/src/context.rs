//! Ambient context and the runtime sandbox.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::BindError;
use crate::value::{Map, Value};

/// Key/value context visible to business code for one execution.
///
/// Cloning is cheap; writes copy the underlying map only when it is shared,
/// so a context handed to a callee never observes the caller's later writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientContext {
    values: Arc<Map>,
}

impl AmbientContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Insert a value, copying the map first if it is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        Arc::make_mut(&mut self.values).insert(key.into(), value);
    }

    /// Return a new context with one more entry.
    pub fn with(&self, key: impl Into<String>, value: Value) -> Self {
        let mut next = self.clone();
        next.insert(key, value);
        next
    }
}

/// Writes a single binding into an ambient context.
///
/// Implementations may refuse a binding; the interceptors decide how a
/// refusal is isolated.
pub trait ContextBinder: Send + Sync {
    fn bind(&self, ctx: &mut AmbientContext, key: &str, value: &Value) -> Result<(), BindError>;
}

impl<F> ContextBinder for F
where
    F: Fn(&mut AmbientContext, &str, &Value) -> Result<(), BindError> + Send + Sync,
{
    fn bind(&self, ctx: &mut AmbientContext, key: &str, value: &Value) -> Result<(), BindError> {
        self(ctx, key, value)
    }
}

/// Determinism sandbox of one workflow instance.
///
/// Restricted by default. Code that only touches interpreter-local state may
/// lift the restriction for a bounded scope with [`Sandbox::relax`].
#[derive(Debug, Default)]
pub struct Sandbox {
    relaxed: AtomicUsize,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_restricted(&self) -> bool {
        self.relaxed.load(Ordering::SeqCst) == 0
    }

    /// Lift the restriction until the returned guard is dropped.
    ///
    /// The guard must not be held across an `.await`.
    pub fn relax(&self) -> SandboxRelaxation<'_> {
        self.relaxed.fetch_add(1, Ordering::SeqCst);
        SandboxRelaxation { sandbox: self }
    }
}

/// Scope during which the sandbox is unrestricted.
#[must_use = "the sandbox is restricted again as soon as the guard is dropped"]
pub struct SandboxRelaxation<'a> {
    sandbox: &'a Sandbox,
}

impl Drop for SandboxRelaxation<'_> {
    fn drop(&mut self) {
        self.sandbox.relaxed.fetch_sub(1, Ordering::SeqCst);
    }
}
