//! Wire payloads and the header channel.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::PayloadError;
use crate::value::Value;

/// Metadata key naming a payload's encoding.
pub const ENCODING_METADATA_KEY: &str = "encoding";

/// An encoded value as it travels on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    pub metadata: HashMap<String, Bytes>,
    pub data: Bytes,
}

impl Payload {
    pub fn new(encoding: &str, data: impl Into<Bytes>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            ENCODING_METADATA_KEY.to_string(),
            Bytes::copy_from_slice(encoding.as_bytes()),
        );
        Self {
            metadata,
            data: data.into(),
        }
    }

    /// The declared encoding, if present and valid UTF-8.
    pub fn encoding(&self) -> Option<&str> {
        self.metadata
            .get(ENCODING_METADATA_KEY)
            .and_then(|raw| std::str::from_utf8(raw).ok())
    }
}

/// Transport-level side channel attached to an outbound call.
pub type Headers = HashMap<String, Payload>;

/// Converts values to and from single payloads.
pub trait PayloadConverter: Send + Sync {
    fn to_payload(&self, value: &Value) -> Result<Payload, PayloadError>;

    fn from_payload(&self, payload: &Payload) -> Result<Value, PayloadError>;
}
