//! A reduced implementation of the node "exports"/"imports" conditional
//! export map, covering the shapes `ExportsFieldPlugin`/`ImportsFieldPlugin`
//! need (§3.1, §4.3.1): a single string, a conditions object, a subpath map,
//! or a subpath map of conditions objects. Wildcards (`./*`) are supported;
//! nested condition fallback arrays are not (out of scope: this engine does
//! not need to be a full node conformance suite, only the fields the
//! resolve pipeline consults).

use serde_json::Value;

/// The result of remapping a subpath through an exports/imports field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapResult {
    /// No matching entry; fall through to ordinary resolution.
    NotFound,
    /// The entry explicitly maps to `null`, i.e. this subpath is forbidden.
    Ignored,
    /// The request should be rewritten to this target path (relative to the
    /// package root).
    Target(String),
}

/// `field` is the parsed `exports` or `imports` value; `request` is the
/// subpath being looked up (for `exports`, `"."` or `"./sub"`; for
/// `imports`, `"#name"` or `"#name/sub"`). `conditions` is the ordered list
/// of condition names to honor (earlier wins).
pub fn remap(field: &Value, request: &str, conditions: &[String]) -> RemapResult {
    match field {
        Value::String(s) => {
            if request == "." || request.is_empty() {
                RemapResult::Target(s.clone())
            } else {
                RemapResult::NotFound
            }
        }
        Value::Null => RemapResult::Ignored,
        Value::Object(map) => {
            // A conditions object has no keys starting with "." or "#"; a
            // subpath map does. Distinguish by inspecting the first key.
            let is_subpath_map = map.keys().any(|k| k.starts_with('.') || k.starts_with('#'));
            if is_subpath_map {
                remap_subpath_map(map, request, conditions)
            } else {
                remap_conditions(map, conditions)
                    .map(RemapResult::Target)
                    .unwrap_or(RemapResult::NotFound)
            }
        }
        _ => RemapResult::NotFound,
    }
}

fn remap_subpath_map(
    map: &serde_json::Map<String, Value>,
    request: &str,
    conditions: &[String],
) -> RemapResult {
    if let Some(value) = map.get(request) {
        return match resolve_value(value, conditions) {
            Some(ValueOrNull::Value(s)) => RemapResult::Target(s),
            Some(ValueOrNull::Null) => RemapResult::Ignored,
            None => RemapResult::NotFound,
        };
    }
    // Wildcard match: the longest pattern key ending in "*" whose prefix
    // matches `request`.
    let mut best: Option<(&str, &str)> = None;
    for key in map.keys() {
        if let Some(prefix) = key.strip_suffix('*') {
            if request.starts_with(prefix) {
                if best.map_or(true, |(best_prefix, _)| prefix.len() > best_prefix.len()) {
                    best = Some((prefix, key));
                }
            }
        }
    }
    if let Some((prefix, key)) = best {
        let remainder = &request[prefix.len()..];
        if let Some(value) = map.get(key) {
            return match resolve_value(value, conditions) {
                Some(ValueOrNull::Value(target)) => {
                    RemapResult::Target(target.replacen('*', remainder, 1))
                }
                Some(ValueOrNull::Null) => RemapResult::Ignored,
                None => RemapResult::NotFound,
            };
        }
    }
    RemapResult::NotFound
}

enum ValueOrNull {
    Value(String),
    Null,
}

fn resolve_value(value: &Value, conditions: &[String]) -> Option<ValueOrNull> {
    match value {
        Value::String(s) => Some(ValueOrNull::Value(s.clone())),
        Value::Null => Some(ValueOrNull::Null),
        Value::Object(map) => remap_conditions(map, conditions).map(|v| {
            if v.is_empty() && map.contains_key("default") && map["default"].is_null() {
                ValueOrNull::Null
            } else {
                ValueOrNull::Value(v)
            }
        }),
        Value::Array(items) => items.iter().find_map(|item| match resolve_value(item, conditions) {
            Some(ValueOrNull::Value(s)) => Some(ValueOrNull::Value(s)),
            _ => None,
        }),
        _ => None,
    }
}

fn remap_conditions(map: &serde_json::Map<String, Value>, conditions: &[String]) -> Option<String> {
    for condition in conditions.iter().chain(std::iter::once(&"default".to_string())) {
        if let Some(value) = map.get(condition) {
            match value {
                Value::String(s) => return Some(s.clone()),
                Value::Null => return None,
                Value::Object(nested) => {
                    if let Some(v) = remap_conditions(nested, conditions) {
                        return Some(v);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_export() {
        let field = json!("./index.js");
        assert_eq!(
            remap(&field, ".", &["node".into()]),
            RemapResult::Target("./index.js".to_string())
        );
    }

    #[test]
    fn conditional_export() {
        let field = json!({ "import": "./esm.js", "require": "./cjs.js" });
        assert_eq!(
            remap(&field, ".", &["require".into()]),
            RemapResult::Target("./cjs.js".to_string())
        );
    }

    #[test]
    fn subpath_with_wildcard() {
        let field = json!({ "./feature/*": "./lib/*.js" });
        assert_eq!(
            remap(&field, "./feature/x", &["node".into()]),
            RemapResult::Target("./lib/x.js".to_string())
        );
    }

    #[test]
    fn null_entry_is_ignored() {
        let field = json!({ "./secret": null });
        assert_eq!(remap(&field, "./secret", &["node".into()]), RemapResult::Ignored);
    }
}
