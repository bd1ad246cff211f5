//! Nested CLDR JSON to dotted key map

use std::collections::HashMap;

use serde_json::Value;

/// Separator placed between path segments.
pub const KEY_SEPARATOR: &str = ".";

/// Dotted key path → string value for one (locale, category) pair.
pub type FlatLocaleData = HashMap<String, String>;

/// Flatten a nested JSON object into a dot-separated key map.
///
/// Objects are walked depth first. Every other value is a leaf: strings are kept as is,
/// `null` becomes an empty string, numbers and booleans use their JSON text, and arrays
/// are kept whole as compact JSON instead of being indexed.
///
/// A root that is not an object has no keys and yields an empty map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use cldr_viewer::cldr::flatten_json;
///
/// let json = json!({ "x": { "y": "1", "z": null } });
///
/// let flattened = flatten_json(&json);
/// assert_eq!(flattened.get("x.y"), Some(&"1".to_string()));
/// assert_eq!(flattened.get("x.z"), Some(&String::new()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value) -> FlatLocaleData {
    let mut result = HashMap::new();
    if let Value::Object(map) = json {
        for (key, value) in map {
            flatten_json_value(value, key, &mut result);
        }
    }
    result
}

/// Walk `json`, writing leaves under `path` into `result`.
fn flatten_json_value(json: &Value, path: &str, result: &mut FlatLocaleData) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = format!("{path}{KEY_SEPARATOR}{key}");
                flatten_json_value(value, &full_key, result);
            }
        }
        Value::String(s) => {
            result.insert(path.to_string(), s.clone());
        }
        Value::Null => {
            result.insert(path.to_string(), String::new());
        }
        Value::Array(_) | Value::Number(_) | Value::Bool(_) => {
            result.insert(path.to_string(), json.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_flatten_json_simple() {
        let json = json!({
            "hello": "Hello",
            "goodbye": "Goodbye"
        });

        let result = flatten_json(&json);

        expect_that!(result.get("hello"), some(eq(&"Hello".to_string())));
        expect_that!(result.get("goodbye"), some(eq(&"Goodbye".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_json_nested_with_null() {
        let json = json!({ "x": { "y": "1", "z": null } });

        let result = flatten_json(&json);

        expect_that!(result.get("x.y"), some(eq(&"1".to_string())));
        expect_that!(result.get("x.z"), some(eq(&String::new())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_json_cldr_shape() {
        let json = json!({
            "main": {
                "fr": {
                    "dates": {
                        "calendars": {
                            "gregorian": {
                                "days": {
                                    "format": {
                                        "wide": { "mon": "lundi", "tue": "mardi" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let result = flatten_json(&json);

        expect_that!(
            result.get("main.fr.dates.calendars.gregorian.days.format.wide.mon"),
            some(eq(&"lundi".to_string()))
        );
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_json_non_string_values() {
        let json = json!({
            "number": 42,
            "float": 1.5,
            "boolean": true,
            "null": null
        });

        let result = flatten_json(&json);

        expect_that!(result.get("number"), some(eq(&"42".to_string())));
        expect_that!(result.get("float"), some(eq(&"1.5".to_string())));
        expect_that!(result.get("boolean"), some(eq(&"true".to_string())));
        expect_that!(result.get("null"), some(eq(&String::new())));
    }

    #[googletest::test]
    fn test_flatten_json_arrays_are_opaque() {
        let json = json!({
            "menu": {
                "items": ["item1", "item2"],
                "users": [{ "name": "Alice" }]
            }
        });

        let result = flatten_json(&json);

        expect_that!(result.get("menu.items"), some(eq(&r#"["item1","item2"]"#.to_string())));
        expect_that!(result.get("menu.users"), some(eq(&r#"[{"name":"Alice"}]"#.to_string())));
        expect_that!(result.contains_key("menu.items[0]"), eq(false));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_json_empty_object_leaves_no_key() {
        let json = json!({ "empty": {}, "kept": "v" });

        let result = flatten_json(&json);

        expect_that!(result.contains_key("empty"), eq(false));
        expect_that!(result.len(), eq(1));
    }

    #[googletest::test]
    fn test_flatten_json_non_object_root() {
        expect_that!(flatten_json(&json!(["a", "b"])), is_empty());
        expect_that!(flatten_json(&json!("text")), is_empty());
        expect_that!(flatten_json(&Value::Null), is_empty());
    }

    #[googletest::test]
    fn test_flatten_json_is_deterministic() {
        let json = json!({ "a": { "b": "Monday", "c": { "d": 3 } }, "e": [1, 2] });

        assert_eq!(flatten_json(&json), flatten_json(&json));
    }

    #[googletest::test]
    fn test_flatten_json_keys_with_dots_are_not_split() {
        let json = json!({ "hoge.fuga": { "piyo": "Hello" } });

        let result = flatten_json(&json);

        expect_that!(result.get("hoge.fuga.piyo"), some(eq(&"Hello".to_string())));
    }
}
