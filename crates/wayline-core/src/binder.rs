//! Default context binder.

use wayline_protocols::{AmbientContext, BindError, ContextBinder, Value};

/// Writes every binding straight into the ambient context.
///
/// Empty keys are refused; everything else overwrites any previous value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBinder;

impl ContextBinder for DefaultBinder {
    fn bind(&self, ctx: &mut AmbientContext, key: &str, value: &Value) -> Result<(), BindError> {
        if key.is_empty() {
            return Err(BindError::InvalidKey(key.to_string()));
        }
        ctx.insert(key, value.clone());
        Ok(())
    }
}
