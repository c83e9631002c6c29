//! Defensive access over raw source documents.
//!
//! No schema is guaranteed across sources: the same concept shows up as a
//! string, a list, a number, or a nested object depending on the site. Every
//! accessor here is missing-key-safe and type-tolerant, returning options and
//! empty vectors instead of failing.

use serde_json::Value;

/// A raw per-source document as a loosely-typed JSON value.
#[derive(Debug, Clone)]
pub struct SourceRecord(Value);

impl SourceRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw access to a top-level field.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First non-empty string found under any of the given keys. Numbers are
    /// stringified; other types are ignored.
    pub fn str_field(&self, keys: &[&str]) -> Option<String> {
        for key in keys {
            match self.0.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    return Some(s.trim().to_string());
                }
                Some(Value::Number(n)) => return Some(n.to_string()),
                _ => {}
            }
        }
        None
    }

    /// First numeric value found under any of the given keys. Strings with a
    /// leading number ("120 events") parse too.
    pub fn f64_field(&self, keys: &[&str]) -> Option<f64> {
        for key in keys {
            match self.0.get(key) {
                Some(Value::Number(n)) => return n.as_f64(),
                Some(Value::String(s)) => {
                    let leading: String = s
                        .trim()
                        .chars()
                        .take_while(|c| c.is_ascii_digit() || *c == '.')
                        .collect();
                    if let Ok(n) = leading.parse::<f64>() {
                        return Some(n);
                    }
                }
                _ => {}
            }
        }
        None
    }

    pub fn u32_field(&self, keys: &[&str]) -> Option<u32> {
        self.f64_field(keys).map(|n| n.max(0.0) as u32)
    }

    /// First boolean found under any of the given keys. String forms
    /// ("true", "yes") count too.
    pub fn bool_field(&self, keys: &[&str]) -> Option<bool> {
        for key in keys {
            match self.0.get(key) {
                Some(Value::Bool(b)) => return Some(*b),
                Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                    "true" | "yes" | "y" | "1" => return Some(true),
                    "false" | "no" | "n" | "0" => return Some(false),
                    _ => {}
                },
                _ => {}
            }
        }
        None
    }

    /// Collect strings from any of the given keys.
    ///
    /// Tolerates every shape the sources produce: a plain string, a list of
    /// strings, or a list of objects (in which case the first present
    /// `object_keys` entry is read from each). Blank entries and literal
    /// "None" placeholders are dropped.
    pub fn string_list(&self, keys: &[&str], object_keys: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for key in keys {
            match self.0.get(key) {
                Some(Value::String(s)) => push_clean(&mut out, s),
                Some(Value::Array(items)) => {
                    for item in items {
                        match item {
                            Value::String(s) => push_clean(&mut out, s),
                            Value::Object(map) => {
                                for object_key in object_keys {
                                    if let Some(Value::String(s)) = map.get(*object_key) {
                                        push_clean(&mut out, s);
                                        break;
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
            if !out.is_empty() {
                break;
            }
        }
        out
    }

    /// The document's native identifier: an explicit id field when present,
    /// else the store's `_id` (tolerating the extended-JSON `{"$oid": ...}`
    /// wrapping).
    pub fn native_id(&self, id_keys: &[&str]) -> Option<String> {
        if let Some(id) = self.str_field(id_keys) {
            return Some(id);
        }
        match self.0.get("_id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(map)) => map
                .get("$oid")
                .and_then(Value::as_str)
                .map(|s| s.to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// A nested object field, if present.
    pub fn object(&self, key: &str) -> Option<&serde_json::Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }
}

fn push_clean(out: &mut Vec<String>, s: &str) {
    let trimmed = s.trim();
    if !trimmed.is_empty() && trimmed != "None" {
        out.push(trimmed.to_string());
    }
}
