//! Deep merge of YAML trees.

use serde_yaml::{Mapping, Value};

/// Merge `overlay` into `base`.
///
/// - Mapping into mapping merges key by key, recursively.
/// - A mapping overlaid onto a missing or non-mapping value replaces it with
///   the overlay's contents.
/// - Everything else, sequences included, overwrites the base value.
/// - `null` in the overlay means "not set" and leaves the base untouched.
/// - Keys only present in `base` are kept.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Null => {}
        Value::Mapping(overlay_map) => {
            if !base.is_mapping() {
                *base = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(base_map) = base {
                for (key, value) in overlay_map {
                    if value.is_null() {
                        continue;
                    }
                    match base_map.get_mut(&key) {
                        Some(existing) => deep_merge(existing, value),
                        None => {
                            let mut fresh = Value::Null;
                            deep_merge(&mut fresh, value);
                            base_map.insert(key, fresh);
                        }
                    }
                }
            }
        }
        other => *base = other,
    }
}
