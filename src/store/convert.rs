//! Field-name convention conversion at the store boundary.
//!
//! Rows travel with snake_case keys; domain types serialize with camelCase
//! fields. The transform is structural: it renames keys at every nesting
//! depth, including arrays of objects (the embedded edit history), and
//! leaves values untouched.

use serde_json::Value;

fn snake_to_camel_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn camel_to_snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn map_keys(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (rename(&k), map_keys(v, rename)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| map_keys(v, rename)).collect())
        }
        other => other,
    }
}

/// snake_case keys → camelCase keys, recursively.
pub fn to_camel_case(value: Value) -> Value {
    map_keys(value, &snake_to_camel_key)
}

/// camelCase keys → snake_case keys, recursively.
pub fn to_snake_case(value: Value) -> Value {
    map_keys(value, &camel_to_snake_key)
}
