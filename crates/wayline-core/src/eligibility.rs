//! Default-serializer eligibility.
//!
//! Decides whether a value can go through the plain JSON path or needs the
//! fallback codec. Models are checked both by their current field values
//! and by their declared field types, since a declared type may admit
//! values the default path cannot round-trip even when the current value
//! happens to be simple.

use std::collections::HashSet;
use std::sync::Arc;

use wayline_protocols::{FieldType, ModelSchema, ModelValue, Value};

/// Codec a value should be encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecStrategy {
    /// Plain JSON.
    Default,
    /// The richer fallback codec.
    Fallback,
}

/// Pick the codec for `value`.
pub fn select_codec(value: &Value) -> CodecStrategy {
    if is_serialize_by_default_serializer(value) {
        CodecStrategy::Default
    } else {
        CodecStrategy::Fallback
    }
}

/// Whether `value` can be handled entirely by the default serializer.
///
/// - scalars are eligible
/// - maps are eligible when every value is
/// - lists are eligible when empty, or when all elements have the same
///   kind and each is eligible
/// - tuples, raw bytes, type references and opaque values are not
/// - models need every field value eligible and no declared field type
///   that admits streams, type references, arbitrary models or type
///   parameters
pub fn is_serialize_by_default_serializer(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => true,
        Value::Map(map) => map.values().all(is_serialize_by_default_serializer),
        Value::List(items) => is_homogeneous_list_eligible(items),
        Value::Model(model) => is_model_eligible(model),
        Value::Tuple(_) | Value::Bytes(_) | Value::Type(_) | Value::Opaque(_) => false,
    }
}

fn is_homogeneous_list_eligible(items: &[Value]) -> bool {
    let Some(first) = items.first() else {
        return true;
    };
    let kind = first.kind();
    items.iter().all(|item| item.kind() == kind)
        && items.iter().all(is_serialize_by_default_serializer)
}

fn is_model_eligible(model: &ModelValue) -> bool {
    let mut visited = HashSet::new();
    schema_is_eligible(model.schema(), &mut visited)
        && model.fields().values().all(is_serialize_by_default_serializer)
}

/// Checks declared field types, following nested model schemas once each.
fn schema_is_eligible(schema: &Arc<ModelSchema>, visited: &mut HashSet<*const ModelSchema>) -> bool {
    if !visited.insert(Arc::as_ptr(schema)) {
        return true;
    }
    schema
        .fields()
        .iter()
        .all(|field| declared_type_is_eligible(&field.ty, visited))
}

fn declared_type_is_eligible(ty: &FieldType, visited: &mut HashSet<*const ModelSchema>) -> bool {
    match ty {
        FieldType::BinaryStream | FieldType::TypeRef | FieldType::AnyModel => false,
        FieldType::TypeParam(_) => false,
        FieldType::Model(schema) => schema_is_eligible(schema, visited),
        FieldType::Optional(inner) | FieldType::List(inner) | FieldType::Map(inner) => {
            declared_type_is_eligible(inner, visited)
        }
        FieldType::Union(variants) => variants
            .iter()
            .all(|variant| declared_type_is_eligible(variant, visited)),
        FieldType::Str
        | FieldType::Int
        | FieldType::Float
        | FieldType::Bool
        | FieldType::DateTime
        | FieldType::Bytes
        | FieldType::Any
        | FieldType::UntypedList
        | FieldType::Tuple => true,
    }
}

#[cfg(test)]
#[path = "eligibility_tests.rs"]
mod eligibility_tests;
