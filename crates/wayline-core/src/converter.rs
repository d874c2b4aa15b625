//! JSON payload converter.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use wayline_protocols::{Payload, PayloadConverter, PayloadError, Value};

/// Encoding tag of payloads produced by [`JsonPayloadConverter`].
pub const JSON_PLAIN_ENCODING: &str = "json/plain";

/// Encodes values as compact JSON with sorted object keys.
///
/// Bytes become base64 strings, type references their name, models and
/// maps become objects and tuples arrays. Opaque values have no JSON form.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadConverter;

impl JsonPayloadConverter {
    pub fn new() -> Self {
        Self
    }

    /// JSON form of `value`.
    pub fn to_json(&self, value: &Value) -> Result<serde_json::Value, PayloadError> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| PayloadError::Unsupported(format!("non-finite float {f}")))?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(STANDARD.encode(b)),
            Value::List(items) | Value::Tuple(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| self.to_json(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(map) => self.object(map.iter())?,
            Value::Model(model) => self.object(model.fields().iter())?,
            Value::Type(name) => serde_json::Value::String(name.clone()),
            Value::Opaque(kind) => {
                return Err(PayloadError::Unsupported(format!("opaque value of kind {kind}")));
            }
        })
    }

    fn object<'a>(
        &self,
        entries: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> Result<serde_json::Value, PayloadError> {
        let mut object = serde_json::Map::new();
        for (key, value) in entries {
            object.insert(key.clone(), self.to_json(value)?);
        }
        Ok(serde_json::Value::Object(object))
    }
}

impl PayloadConverter for JsonPayloadConverter {
    fn to_payload(&self, value: &Value) -> Result<Payload, PayloadError> {
        let json = self.to_json(value)?;
        let data = serde_json::to_vec(&json)?;
        Ok(Payload::new(JSON_PLAIN_ENCODING, data))
    }

    fn from_payload(&self, payload: &Payload) -> Result<Value, PayloadError> {
        match payload.encoding() {
            None => Err(PayloadError::MissingEncoding),
            Some(JSON_PLAIN_ENCODING) => {
                let json: serde_json::Value = serde_json::from_slice(&payload.data)?;
                Ok(Value::from(json))
            }
            Some(other) => Err(PayloadError::UnknownEncoding(other.to_string())),
        }
    }
}
