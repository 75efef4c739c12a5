//! echo — return the `output` parameter back to the caller.

use modrun_harness::{resolve, Module, ModuleSchema, ParamSet};
use modrun_types::{value_to_string, ModuleResult, ParamKind, ParamResult, ParamSpec, Value};

/// Echo module: reports the resolved `output` value as the result message.
pub struct Echo;

impl Echo {
    fn output_spec() -> ParamSpec {
        ParamSpec::required("output", ParamKind::Str, "Value to echo back in the result message")
            .with_aliases(["data"])
    }
}

impl Module for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ModuleSchema {
        ModuleSchema::new("echo", "Echo a value back to the caller").param(Self::output_spec())
    }

    fn run(&self, params: &ParamSet) -> ParamResult<ModuleResult> {
        let output = resolve(params, &Self::output_spec())?;
        let mut result = ModuleResult::new();
        result.set_changed(true);
        match output {
            Value::String(s) => result.set_msg(s),
            other => result.set_msg(value_to_string(&other)),
        }
        Ok(result)
    }
}
