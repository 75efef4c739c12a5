//! Parameter set loading and lookup.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use modrun_types::{json_to_value, Value};

use crate::coerce::coerce_bool;

/// Prefix for control keys injected by the invoking framework.
///
/// Keys with this prefix are extracted at decode time and never visible
/// to modules.
pub const RESERVED_PREFIX: &str = "_ansible_";

const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Errors loading the parameters file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read parameters file {0}: {1}")]
    Read(String, String),
    #[error("could not decode parameters file {0}: {1}")]
    Decode(String, String),
    #[error("parameters file {0} must contain a JSON object")]
    NotObject(String),
}

/// Decoded input parameters for one module invocation.
///
/// Immutable after decode.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    values: HashMap<String, Value>,
    check_mode: bool,
}

impl ParamSet {
    /// Read and decode a UTF-8 JSON parameters file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let path_str = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Read(path_str.clone(), e.to_string()))?;
        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| LoadError::Decode(path_str.clone(), e.to_string()))?;
        match json {
            serde_json::Value::Object(map) => {
                let params = Self::from_object(map);
                debug!(
                    path = path_str.as_str(),
                    count = params.values.len(),
                    check_mode = params.check_mode,
                    "decoded parameters"
                );
                Ok(params)
            }
            _ => Err(LoadError::NotObject(path_str)),
        }
    }

    /// Build a parameter set from an already-decoded JSON object.
    ///
    /// Reserved control keys are extracted here: `_ansible_check_mode`
    /// toggles check mode (truth-table boolean, default false), and every
    /// other `_ansible_`-prefixed key is dropped.
    pub fn from_object(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut values = HashMap::new();
        let mut check_mode = false;
        for (key, json) in map {
            if key.starts_with(RESERVED_PREFIX) {
                if key == CHECK_MODE_KEY {
                    check_mode = coerce_bool(&json_to_value(json));
                }
                continue;
            }
            values.insert(key, json_to_value(json));
        }
        Self { values, check_mode }
    }

    /// Look up a single key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Probe candidate keys in order; the first present key wins.
    pub fn probe<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Option<&Value> {
        candidates.into_iter().find_map(|key| self.values.get(key))
    }

    /// Whether the invocation requested a check/dry run.
    pub fn check_mode(&self) -> bool {
        self.check_mode
    }

    /// Number of module-visible parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no module-visible parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(json: serde_json::Value) -> ParamSet {
        match json {
            serde_json::Value::Object(map) => ParamSet::from_object(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn reserved_keys_are_stripped() {
        let params = from_json(json!({
            "output": "hello",
            "_ansible_check_mode": true,
            "_ansible_no_log": false,
        }));
        assert_eq!(params.len(), 1);
        assert!(params.get("_ansible_check_mode").is_none());
        assert!(params.get("_ansible_no_log").is_none());
        assert!(params.check_mode());
    }

    #[test]
    fn check_mode_defaults_to_false() {
        let params = from_json(json!({"output": "hello"}));
        assert!(!params.check_mode());
    }

    #[test]
    fn check_mode_accepts_truthy_strings() {
        let params = from_json(json!({"_ansible_check_mode": "yes"}));
        assert!(params.check_mode());
        let params = from_json(json!({"_ansible_check_mode": "false"}));
        assert!(!params.check_mode());
    }

    #[test]
    fn probe_returns_first_match() {
        let params = from_json(json!({"data": "second", "output": "first"}));
        let value = params.probe(["output", "data"]).cloned();
        assert_eq!(value, Some(Value::String("first".into())));
        let value = params.probe(["missing", "data"]).cloned();
        assert_eq!(value, Some(Value::String("second".into())));
        assert!(params.probe(["nope"]).is_none());
    }
}
