//! Type coercion — one dedicated function per parameter kind.
//!
//! Coercion is applied after resolution and choice checking, never to a
//! null value. Numeric coercion of non-numeric input yields null rather
//! than an error; list and path coercion can fail.

use modrun_types::{value_to_string, ParamError, ParamKind, ParamResult, Value};

/// Coerce a resolved value to the declared parameter kind.
pub fn coerce(name: &str, kind: ParamKind, value: Value) -> ParamResult<Value> {
    if matches!(value, Value::Null) {
        return Ok(Value::Null);
    }
    match kind {
        ParamKind::Str => Ok(Value::String(value_to_string(&value))),
        ParamKind::Bool => Ok(Value::Bool(coerce_bool(&value))),
        ParamKind::Int => Ok(coerce_int(&value)),
        ParamKind::Float => Ok(coerce_float(&value)),
        ParamKind::Path => coerce_path(name, &value),
        ParamKind::List => coerce_list(name, value),
        ParamKind::Raw => Ok(value),
    }
}

/// Truth table: "yes", "on", "1", "true" (case-insensitive), the integer
/// 1, and native true are true; everything else is false.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i == 1,
        Value::String(s) => {
            matches!(
                s.to_ascii_lowercase().as_str(),
                "yes" | "on" | "1" | "true"
            )
        }
        _ => false,
    }
}

fn coerce_int(value: &Value) -> Value {
    match value {
        Value::Int(i) => Value::Int(*i),
        Value::Float(f) => Value::Int(*f as i64),
        Value::String(s) => s.trim().parse::<i64>().map(Value::Int).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn coerce_float(value: &Value) -> Value {
    match value {
        Value::Float(f) => Value::Float(*f),
        Value::Int(i) => Value::Float(*i as f64),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn coerce_list(name: &str, value: Value) -> ParamResult<Value> {
    match value {
        Value::Json(serde_json::Value::Array(_)) => Ok(value),
        Value::String(s) => {
            let items = s
                .split(',')
                .map(|part| serde_json::Value::String(part.trim().to_string()))
                .collect();
            Ok(Value::Json(serde_json::Value::Array(items)))
        }
        Value::Int(i) => Ok(Value::Json(serde_json::json!([i]))),
        _ => Err(ParamError::InvalidListShape {
            name: name.to_string(),
        }),
    }
}

fn coerce_path(name: &str, value: &Value) -> ParamResult<Value> {
    let invalid = || ParamError::InvalidPath {
        name: name.to_string(),
        path: value_to_string(value),
    };
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Int(_) | Value::Float(_) => value_to_string(value),
        _ => return Err(invalid()),
    };
    let expanded = expand_vars(&expand_tilde(&raw));
    if path_shape_ok(&expanded) {
        return Ok(Value::String(expanded));
    }
    // Foreign drive prefix: retry under the first available filesystem root.
    if let Some(rest) = drive_prefix(&expanded) {
        let rest = rest.replace('\\', "/");
        let candidate = format!("{}{}", first_root(), rest.trim_start_matches('/'));
        if path_shape_ok(&candidate) {
            return Ok(Value::String(candidate));
        }
    }
    Err(invalid())
}

/// Expand a leading `~` or `~/` to `$HOME`.
fn expand_tilde(s: &str) -> String {
    if s == "~" {
        std::env::var("HOME").unwrap_or_else(|_| "~".to_string())
    } else if let Some(rest) = s.strip_prefix("~/") {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/{rest}"),
            Err(_) => s.to_string(),
        }
    } else {
        s.to_string()
    }
}

/// Expand `$VAR` and `${VAR}` references. Unset variables are left as-is.
fn expand_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(inner) = tail.strip_prefix("${") {
            match inner.find('}') {
                Some(close) => {
                    let name = &inner[..close];
                    match std::env::var(name) {
                        Ok(val) => out.push_str(&val),
                        Err(_) => out.push_str(&tail[..close + 3]),
                    }
                    rest = &inner[close + 1..];
                }
                None => {
                    out.push_str(tail);
                    return out;
                }
            }
            continue;
        }
        let name_len = tail[1..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if name_len == 0 {
            out.push('$');
            rest = &tail[1..];
            continue;
        }
        let name = &tail[1..1 + name_len];
        match std::env::var(name) {
            Ok(val) => out.push_str(&val),
            Err(_) => out.push_str(&tail[..1 + name_len]),
        }
        rest = &tail[1 + name_len..];
    }
    out.push_str(rest);
    out
}

/// A syntactically usable path: non-empty, no NUL bytes, and no drive
/// prefix foreign to this platform.
fn path_shape_ok(s: &str) -> bool {
    if s.is_empty() || s.contains('\0') {
        return false;
    }
    #[cfg(not(windows))]
    if drive_prefix(s).is_some() {
        return false;
    }
    true
}

/// Split a leading `X:` drive prefix, returning the remainder.
fn drive_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(&s[2..])
    } else {
        None
    }
}

/// First available filesystem root, for drive substitution.
fn first_root() -> &'static str {
    if cfg!(windows) {
        "C:\\"
    } else {
        "/"
    }
}
