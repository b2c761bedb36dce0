//! Layer merge logic
//!
//! Objects deep-merge by key, so a layer can touch one family without
//! restating the table. Arrays replace and scalars override.

use serde_json::Value;

/// Deep merge two JSON values.
///
/// - Objects: deep-merge by key (recursive)
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Arrays replace, so a layer that lists `classes` owns them
        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
