//! Keeping a rewritten database laid out like the file it came from.

use serde_json::{Map, Value};

/// Reorder `value` after `source`. Keys keep their source position and new
/// keys follow. A source array the serializer skipped comes back as `[]`,
/// and an empty field the source never had stays out. Records in arrays
/// are paired by `name`, anything else by index when the lengths agree.
pub fn follow(value: Value, source: &Value) -> Value {
    match (value, source) {
        (Value::Object(map), Value::Object(old)) => Value::Object(follow_object(map, old)),
        (Value::Array(items), Value::Array(old)) => {
            let same_len = items.len() == old.len();
            let items = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    let matched = match item.get("name") {
                        Some(name) => old.iter().find(|o| o.get("name") == Some(name)),
                        None if same_len => old.get(i),
                        None => None,
                    };
                    match matched {
                        Some(o) => follow(item, o),
                        None => item,
                    }
                })
                .collect();
            Value::Array(items)
        }
        (value, _) => value,
    }
}

fn follow_object(map: Map<String, Value>, old: &Map<String, Value>) -> Map<String, Value> {
    let mut fresh: Vec<(String, Value)> = map.into_iter().collect();
    let mut out = Map::with_capacity(fresh.len());

    for (key, old_value) in old {
        if let Some(i) = fresh.iter().position(|(k, _)| k == key) {
            let (k, v) = fresh.remove(i);
            out.insert(k, follow(v, old_value));
        } else if old_value.is_array() {
            out.insert(key.clone(), Value::Array(Vec::new()));
        }
    }
    out.extend(fresh.into_iter().filter(|(_, v)| !is_blank(v)));
    out
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_order_wins() {
        let source = json!({"b": 1, "a": 2});
        let out = follow(json!({"a": 3, "b": 4, "c": 5}), &source);
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_records_pair_by_name() {
        let source = json!([{"name": "B", "y": 1, "x": 1}, {"name": "A", "y": 1, "x": 1}]);
        let out = follow(json!([{"name": "A", "x": 2, "y": 2}, {"name": "C", "x": 3}]), &source);
        let first: Vec<&String> = out[0].as_object().unwrap().keys().collect();
        assert_eq!(first, ["name", "y", "x"]);
        assert_eq!(out[1], json!({"name": "C", "x": 3}));
    }

    #[test]
    fn test_skipped_array_restored_and_new_blank_dropped() {
        let source = json!({"aliases": [], "name": "A"});
        let out = follow(json!({"name": "A", "whatItIs": ""}), &source);
        assert_eq!(out, json!({"aliases": [], "name": "A"}));
    }
}
