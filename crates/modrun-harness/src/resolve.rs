//! The parameter resolver.

use tracing::debug;

use modrun_types::{ParamError, ParamResult, ParamSpec, Value};

use crate::coerce;
use crate::params::ParamSet;

/// Resolve one parameter against the input set.
///
/// Probes the parameter name and each alias in order; the first key
/// present wins. A missing required parameter fails; a missing optional
/// one falls back to its declared default. Choice membership is checked
/// on the raw input value, then the value is coerced to the declared
/// kind. Errors travel up as values; the top-level handler turns them
/// into a failure emission.
pub fn resolve(params: &ParamSet, spec: &ParamSpec) -> ParamResult<Value> {
    let found = params.probe(spec.candidates()).cloned();

    let value = match found {
        Some(value) => {
            debug!(param = spec.name.as_str(), "resolved parameter");
            if let Some(choices) = &spec.choices {
                if !choices.contains(&value) {
                    return Err(ParamError::invalid_choice(spec, &value));
                }
            }
            value
        }
        None => {
            if spec.required {
                return Err(ParamError::missing(spec));
            }
            spec.default.clone().unwrap_or(Value::Null)
        }
    };

    coerce::coerce(&spec.name, spec.kind, value)
}
