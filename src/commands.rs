//! Command implementations behind the `wayline` binary.
//!
//! Each command returns the text to print so it can be tested without a
//! terminal.

use std::path::Path;

use tracing::debug;
use wayline_config::Config;
use wayline_core::{
    CodecStrategy, InterceptorStack, JsonPayloadConverter, extract_metadata, select_codec,
};
use wayline_protocols::Value;

use crate::error::{Result, WaylineError};

async fn read_json(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    debug!("Loaded JSON document from {}", path.display());
    Ok(Value::from(json))
}

/// Report which codec a dumped payload would be encoded with.
pub async fn check(path: &Path) -> Result<String> {
    let value = read_json(path).await?;
    let strategy = match select_codec(&value) {
        CodecStrategy::Default => "default",
        CodecStrategy::Fallback => "fallback",
    };
    Ok(strategy.to_string())
}

/// Print the metadata carried by a JSON array of call arguments.
pub async fn extract(path: &Path) -> Result<String> {
    let Value::List(args) = read_json(path).await? else {
        return Err(WaylineError::InvalidInput(format!(
            "{} must contain a JSON array of arguments",
            path.display()
        )));
    };

    match extract_metadata(&args) {
        Some(metadata) => {
            let json = JsonPayloadConverter::new().to_json(&Value::Map(metadata.clone()))?;
            Ok(serde_json::to_string_pretty(&json)?)
        }
        None => Ok("no metadata".to_string()),
    }
}

/// List the interceptors a worker would install, outermost first.
pub fn interceptors(config: &Config, stack: &InterceptorStack) -> String {
    if stack.is_empty() {
        return "no interceptors enabled".to_string();
    }

    let mut lines = Vec::with_capacity(stack.len());
    for (i, name) in stack.names().into_iter().enumerate() {
        let line = if name == wayline_core::NodeIdInterceptor::NAME {
            format!(
                "{}. {} (header: {})",
                i + 1,
                name,
                config.interceptors.node_id_header_key
            )
        } else {
            format!("{}. {}", i + 1, name)
        };
        lines.push(line);
    }
    lines.join("\n")
}
