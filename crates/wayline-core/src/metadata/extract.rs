//! Locating and merging the metadata carrier in call arguments.

use wayline_protocols::keys::METADATA_CONTEXT_KEY;
use wayline_protocols::{Map, Value};

/// Find the propagated metadata mapping in positional arguments.
///
/// Scans left to right and returns the first argument that is a map holding
/// [`METADATA_CONTEXT_KEY`] bound to a map. Arguments of any other shape are
/// skipped.
pub fn extract_metadata(args: &[Value]) -> Option<&Map> {
    args.iter()
        .filter_map(Value::as_map)
        .filter_map(|arg| arg.get(METADATA_CONTEXT_KEY))
        .find_map(Value::as_map)
}

/// Inject `metadata` into outbound arguments.
///
/// The carrier [`extract_metadata`] would pick has its mapping updated in
/// place. Without one, the first argument holding [`METADATA_CONTEXT_KEY`]
/// bound to a non-map is overwritten; otherwise a new carrier map is
/// appended. Empty metadata leaves the arguments untouched. Merging twice
/// with the same metadata yields the same arguments as merging once.
pub fn merge_metadata(args: &mut Vec<Value>, metadata: &Map) {
    if metadata.is_empty() {
        return;
    }

    let carried = args
        .iter_mut()
        .filter_map(Value::as_map_mut)
        .filter_map(|arg| arg.get_mut(METADATA_CONTEXT_KEY))
        .find_map(Value::as_map_mut);
    if let Some(carried) = carried {
        for (key, value) in metadata {
            carried.insert(key.clone(), value.clone());
        }
        return;
    }

    let malformed = args
        .iter_mut()
        .filter_map(Value::as_map_mut)
        .find_map(|arg| arg.get_mut(METADATA_CONTEXT_KEY));
    match malformed {
        Some(slot) => *slot = Value::Map(metadata.clone()),
        None => args.push(Value::map([(
            METADATA_CONTEXT_KEY,
            Value::Map(metadata.clone()),
        )])),
    }
}
