//! The Module trait and the harness entry point.

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use modrun_types::{ModuleResult, ParamResult, ParamSpec};

use crate::emit::Emission;
use crate::params::ParamSet;

const CHECK_MODE_MSG: &str = "remote module does not support check mode";

/// Schema describing a module's interface.
#[derive(Debug, Clone)]
pub struct ModuleSchema {
    /// Module name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions.
    pub params: Vec<ParamSpec>,
    /// Whether the module can honor a check/dry run.
    pub supports_check_mode: bool,
}

impl ModuleSchema {
    /// Create a new module schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            supports_check_mode: false,
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Declare check-mode support.
    pub fn with_check_mode(mut self) -> Self {
        self.supports_check_mode = true;
        self
    }
}

/// A module that can be executed by the harness.
pub trait Module {
    /// The module's name (used in diagnostics).
    fn name(&self) -> &str;

    /// Get the module's schema.
    fn schema(&self) -> ModuleSchema;

    /// Execute the module against the decoded parameter set.
    fn run(&self, params: &ParamSet) -> ParamResult<ModuleResult>;
}

/// Run a module against an already-decoded parameter set.
///
/// Applies the check-mode gate, dispatches, and maps every failure path
/// to a failure emission. The process is not touched here.
pub fn run_module(module: &dyn Module, params: &ParamSet) -> Emission {
    if params.check_mode() && !module.schema().supports_check_mode {
        debug!(module = module.name(), "check mode requested but unsupported");
        return Emission::skip(CHECK_MODE_MSG);
    }
    match module.run(params) {
        Ok(result) if result.is_failed() => {
            let msg = result
                .get("msg")
                .and_then(|m| m.as_str())
                .unwrap_or("module failed")
                .to_string();
            Emission::failure(result, msg)
        }
        Ok(result) => Emission::success(result),
        Err(err) => Emission::failure(ModuleResult::new(), err.to_string()),
    }
}

/// Load the parameters file and run a module over it.
pub fn run_module_from_file(module: &dyn Module, path: &Path) -> Emission {
    match ParamSet::from_file(path) {
        Ok(params) => run_module(module, &params),
        Err(err) => Emission::failure(ModuleResult::new(), err.to_string()),
    }
}

/// Harness entry point: parse argv, run the module, write the result.
///
/// This is the sole normal exit path of a module process. Stdout carries
/// exactly one compact JSON object; the returned code is handed straight
/// back from `main`.
pub fn exec_module(module: &dyn Module) -> ExitCode {
    let mut args = std::env::args().skip(1);
    let emission = match args.next() {
        Some(path) => run_module_from_file(module, Path::new(&path)),
        None => Emission::failure(
            ModuleResult::new(),
            format!("usage: {} <params-file>", module.name()),
        ),
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = emission.write_to(&mut stdout) {
        eprintln!("could not write result: {err}");
        return ExitCode::FAILURE;
    }
    emission.exit_code()
}
