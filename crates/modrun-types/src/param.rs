//! Parameter specifications and resolution errors.

use thiserror::Error;

use crate::value::{value_to_string, Value};

/// Semantic type applied to a resolved parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamKind {
    /// Canonical string representation.
    Str,
    /// Truth-table boolean ("yes", "on", "1", "true", 1, true).
    Bool,
    /// Numeric coercion to integer; non-numeric input yields null.
    Int,
    /// Numeric coercion to float; non-numeric input yields null.
    Float,
    /// Filesystem path with environment and tilde expansion.
    Path,
    /// Sequence; comma-split strings and wrapped scalar integers.
    List,
    /// No coercion.
    #[default]
    Raw,
}

/// Specification for a single module parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Coercion applied to the resolved value.
    pub kind: ParamKind,
    /// Whether this parameter is required.
    pub required: bool,
    /// Default value if not required.
    pub default: Option<Value>,
    /// Description for documentation.
    pub description: String,
    /// Alternative names for this parameter, probed after `name`.
    pub aliases: Vec<String>,
    /// Restrict the raw input value to this set.
    pub choices: Option<Vec<Value>>,
    /// Custom message for a missing required parameter.
    pub required_message: Option<String>,
    /// Custom message for a choice violation.
    pub choices_message: Option<String>,
}

impl ParamSpec {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        kind: ParamKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: description.into(),
            aliases: Vec::new(),
            choices: None,
            required_message: None,
            choices_message: None,
        }
    }

    /// Create an optional parameter with a default value.
    pub fn optional(
        name: impl Into<String>,
        kind: ParamKind,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: Some(default),
            description: description.into(),
            aliases: Vec::new(),
            choices: None,
            required_message: None,
            choices_message: None,
        }
    }

    /// Add alternative names for this parameter.
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the raw input value to a fixed set of choices.
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Value>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }

    /// Override the message reported when a required parameter is missing.
    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Override the message reported on a choice violation.
    pub fn with_choices_message(mut self, message: impl Into<String>) -> Self {
        self.choices_message = Some(message.into());
        self
    }

    /// Candidate keys in probe order: the name, then each alias.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Check if a key matches this parameter or any of its aliases.
    pub fn matches(&self, key: &str) -> bool {
        if self.name == key {
            return true;
        }
        self.aliases.iter().any(|a| a == key)
    }
}

/// Result type for parameter resolution.
pub type ParamResult<T> = Result<T, ParamError>;

/// Parameter resolution errors.
///
/// Every variant is fatal for the invocation: the harness converts it
/// into a failure result object and the process exits with status 1.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{message}")]
    MissingParameter { name: String, message: String },
    #[error("{message}")]
    InvalidChoice { name: String, message: String },
    #[error("invalid path for parameter {name}: {path}")]
    InvalidPath { name: String, path: String },
    #[error("parameter {name} cannot be converted to a list: expected string, sequence, or integer")]
    InvalidListShape { name: String },
}

impl ParamError {
    /// Missing required parameter, with the spec's custom message if set.
    pub fn missing(spec: &ParamSpec) -> Self {
        let message = spec
            .required_message
            .clone()
            .unwrap_or_else(|| format!("missing required argument: {}", spec.name));
        Self::MissingParameter {
            name: spec.name.clone(),
            message,
        }
    }

    /// Choice violation, with the spec's custom message if set.
    pub fn invalid_choice(spec: &ParamSpec, value: &Value) -> Self {
        let message = spec.choices_message.clone().unwrap_or_else(|| {
            let allowed = spec
                .choices
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(value_to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "value of {} must be one of: {}, got: {}",
                spec.name,
                allowed,
                value_to_string(value)
            )
        });
        Self::InvalidChoice {
            name: spec.name.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_probe_name_first() {
        let spec = ParamSpec::required("output", ParamKind::Str, "payload")
            .with_aliases(["data", "content"]);
        let keys: Vec<_> = spec.candidates().collect();
        assert_eq!(keys, vec!["output", "data", "content"]);
    }

    #[test]
    fn matches_name_and_aliases() {
        let spec = ParamSpec::required("recursive", ParamKind::Bool, "descend")
            .with_aliases(["r"]);
        assert!(spec.matches("recursive"));
        assert!(spec.matches("r"));
        assert!(!spec.matches("R"));
    }

    #[test]
    fn missing_uses_custom_message() {
        let spec = ParamSpec::required("output", ParamKind::Str, "payload")
            .with_required_message("output is mandatory");
        assert_eq!(
            ParamError::missing(&spec).to_string(),
            "output is mandatory"
        );
    }

    #[test]
    fn missing_default_message_names_parameter() {
        let spec = ParamSpec::required("output", ParamKind::Str, "payload");
        assert_eq!(
            ParamError::missing(&spec).to_string(),
            "missing required argument: output"
        );
    }

    #[test]
    fn invalid_choice_lists_allowed_values() {
        let spec = ParamSpec::optional("state", ParamKind::Str, Value::String("present".into()), "state")
            .with_choices([Value::String("present".into()), Value::String("absent".into())]);
        let err = ParamError::invalid_choice(&spec, &Value::String("latest".into()));
        assert_eq!(
            err.to_string(),
            "value of state must be one of: present, absent, got: latest"
        );
    }
}
