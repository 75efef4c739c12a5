//! ModuleResult — the JSON result object every module invocation emits.
//!
//! A result always carries a boolean `changed` key by the time it is
//! serialized; failures additionally carry `failed: true` and a `msg`.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// The outcome mapping a module builds up and hands to the emitter.
///
/// Created empty, mutated incrementally, consumed exactly once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleResult {
    fields: Map<String, JsonValue>,
}

impl ModuleResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a failure result with a message.
    pub fn failure(msg: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.insert("failed", true);
        result.set_msg(msg);
        result
    }

    /// Create a skipped result (exit status 0, nothing changed).
    pub fn skipped(msg: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.insert("skipped", true);
        result.set_changed(false);
        result.set_msg(msg);
        result
    }

    /// Set an arbitrary field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Set the `changed` flag.
    pub fn set_changed(&mut self, changed: bool) {
        self.insert("changed", changed);
    }

    /// Set the human-readable message.
    pub fn set_msg(&mut self, msg: impl Into<String>) {
        self.insert("msg", msg.into());
    }

    /// Append a non-fatal warning to the `warnings` array.
    pub fn warn(&mut self, warning: impl Into<String>) {
        let entry = JsonValue::String(warning.into());
        if let Some(JsonValue::Array(items)) = self.fields.get_mut("warnings") {
            items.push(entry);
            return;
        }
        self.insert("warnings", JsonValue::Array(vec![entry]));
    }

    /// Insert `changed: false` if the caller never set it.
    pub fn ensure_changed(&mut self) {
        if !self.fields.contains_key("changed") {
            self.set_changed(false);
        }
    }

    /// True if this result reports a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self.fields.get("failed"), Some(JsonValue::Bool(true)))
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Maximum nesting depth of the result, counting this object as one level.
    pub fn nesting_depth(&self) -> usize {
        1 + self.fields.values().map(depth_of).max().unwrap_or(0)
    }
}

impl Serialize for ModuleResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

fn depth_of(value: &JsonValue) -> usize {
    match value {
        JsonValue::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        JsonValue::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}
