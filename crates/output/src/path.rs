//! Quoted dot-path mini-language for addressing values inside an arbitrary
//! JSON document.
//!
//! Paths look like `'auth'.{env}.'accessToken'`: segments are separated by
//! the three-character delimiter `'.'`, one bare apostrophe is stripped from
//! each end of a segment, and the reserved segment `{env}` resolves to the
//! active environment name.

use serde_json::{Map, Value};

const SEGMENT_DELIMITER: &str = "'.'";
const ENV_PLACEHOLDER: &str = "{env}";

/// Read the string at `path`, resolving `{env}` to `env`.
///
/// The descent is as forgiving as the write path: keys that are absent, or
/// that hold a non-object where the path keeps going, are replaced with
/// empty objects — yes, even on read. Established consumers depend on the
/// document coming out of a read/rewrite cycle with those placeholders
/// present, so this stays.
pub fn read_value(doc: &mut Value, path: &str, env: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    let keys = segments(path, env);
    descend(doc, &keys).as_str().map(str::to_string)
}

/// Write `value` as a string at `path`. A missing path or value makes the
/// whole call a no-op; the document is untouched.
pub fn write_value(doc: &mut Value, path: Option<&str>, env: &str, value: Option<&str>) {
    let (Some(path), Some(value)) = (path, value) else {
        return;
    };
    if path.is_empty() {
        return;
    }

    let keys = segments(path, env);
    let Some((last, parents)) = keys.split_last() else {
        return;
    };

    let slot = descend(doc, parents);
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        map.insert(last.clone(), Value::String(value.to_string()));
    }
}

/// Pretty-print the document (2-space indentation); optionally rewrite every
/// LF to CRLF for Windows consumers.
pub fn render(doc: &Value, windows_newlines: bool) -> String {
    let json = serde_json::to_string_pretty(doc).unwrap_or_default();
    if windows_newlines {
        json.replace('\n', "\r\n")
    } else {
        json
    }
}

/// Split a path expression into resolved segment names.
fn segments(path: &str, env: &str) -> Vec<String> {
    path.split(SEGMENT_DELIMITER).map(|segment| resolve_segment(segment, env)).collect()
}

fn resolve_segment(raw: &str, env: &str) -> String {
    let segment = raw.strip_prefix('\'').unwrap_or(raw);
    let segment = segment.strip_suffix('\'').unwrap_or(segment);
    if segment == ENV_PLACEHOLDER {
        env.to_string()
    } else {
        segment.to_string()
    }
}

/// Step into `keys` one level at a time, converting whatever stands in the
/// way into an empty object. The final landed value is returned as-is.
fn descend<'a>(mut current: &'a mut Value, keys: &[String]) -> &'a mut Value {
    for key in keys {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            other => other,
        };
    }
    current
}
