//! Integration tests for the module harness: parameter file loading,
//! check-mode gating, and failure emission.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use modrun_harness::{resolve, run_module, run_module_from_file, Emission, Module, ModuleSchema, ParamSet};
use modrun_types::{ModuleResult, ParamKind, ParamResult, ParamSpec, Value};
use serde_json::json;

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_params_file(content: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "modrun-harness-test-{}-{}.json",
        std::process::id(),
        id
    ));
    std::fs::write(&path, content).unwrap();
    path
}

fn params(json: serde_json::Value) -> ParamSet {
    match json {
        serde_json::Value::Object(map) => ParamSet::from_object(map),
        _ => panic!("fixture must be an object"),
    }
}

fn body(emission: &Emission) -> serde_json::Value {
    let mut buf = Vec::new();
    emission.write_to(&mut buf).unwrap();
    serde_json::from_slice(&buf).unwrap()
}

/// Test module: reports its required `output` parameter back as `msg`.
struct Reporter;

impl Reporter {
    fn output_spec() -> ParamSpec {
        ParamSpec::required("output", ParamKind::Str, "value to report")
    }
}

impl Module for Reporter {
    fn name(&self) -> &str {
        "reporter"
    }

    fn schema(&self) -> ModuleSchema {
        ModuleSchema::new("reporter", "Report a value back").param(Self::output_spec())
    }

    fn run(&self, params: &ParamSet) -> ParamResult<ModuleResult> {
        let output = resolve(params, &Self::output_spec())?;
        let mut result = ModuleResult::new();
        result.set_changed(true);
        match output {
            Value::String(s) => result.set_msg(s),
            other => result.set_msg(modrun_types::value_to_string(&other)),
        }
        Ok(result)
    }
}

/// Test module that honors check mode.
struct DryRunner;

impl Module for DryRunner {
    fn name(&self) -> &str {
        "dry-runner"
    }

    fn schema(&self) -> ModuleSchema {
        ModuleSchema::new("dry-runner", "Does nothing, supports check mode").with_check_mode()
    }

    fn run(&self, _params: &ParamSet) -> ParamResult<ModuleResult> {
        Ok(ModuleResult::new())
    }
}

/// Test module that reports failure through its result object.
struct Faulty;

impl Module for Faulty {
    fn name(&self) -> &str {
        "faulty"
    }

    fn schema(&self) -> ModuleSchema {
        ModuleSchema::new("faulty", "Always fails")
    }

    fn run(&self, _params: &ParamSet) -> ParamResult<ModuleResult> {
        Ok(ModuleResult::failure("internal fault"))
    }
}

// =============================================================================
// END-TO-END SCENARIOS
// =============================================================================

#[test]
fn reporter_success_scenario() {
    let emission = run_module(&Reporter, &params(json!({"output": "hello"})));
    assert!(emission.is_success());
    assert_eq!(body(&emission), json!({"changed": true, "msg": "hello"}));
}

#[test]
fn missing_required_parameter_fails() {
    let emission = run_module(&Reporter, &params(json!({})));
    assert!(!emission.is_success());
    let result = body(&emission);
    assert_eq!(result["failed"], json!(true));
    assert_eq!(result["msg"], json!("missing required argument: output"));
}

#[test]
fn check_mode_without_support_skips() {
    let emission = run_module(&Reporter, &params(json!({"_ansible_check_mode": true})));
    assert!(emission.is_success());
    assert_eq!(
        body(&emission),
        json!({
            "skipped": true,
            "changed": false,
            "msg": "remote module does not support check mode"
        })
    );
}

#[test]
fn check_mode_with_support_runs() {
    let emission = run_module(&DryRunner, &params(json!({"_ansible_check_mode": true})));
    assert!(emission.is_success());
    assert_eq!(body(&emission), json!({"changed": false}));
}

#[test]
fn failed_result_exits_nonzero() {
    let emission = run_module(&Faulty, &params(json!({})));
    assert!(!emission.is_success());
    let result = body(&emission);
    assert_eq!(result["failed"], json!(true));
    assert_eq!(result["msg"], json!("internal fault"));
}

// =============================================================================
// PARAMETERS FILE HANDLING
// =============================================================================

#[test]
fn runs_from_params_file() {
    let path = write_params_file(r#"{"output": "from disk"}"#);
    let emission = run_module_from_file(&Reporter, &path);
    let _ = std::fs::remove_file(&path);
    assert!(emission.is_success());
    assert_eq!(body(&emission), json!({"changed": true, "msg": "from disk"}));
}

#[test]
fn unreadable_params_file_fails() {
    let path = std::env::temp_dir().join("modrun-harness-test-missing.json");
    let emission = run_module_from_file(&Reporter, &path);
    assert!(!emission.is_success());
    let result = body(&emission);
    assert_eq!(result["failed"], json!(true));
    assert!(result["msg"]
        .as_str()
        .unwrap()
        .contains("could not read parameters file"));
}

#[test]
fn malformed_params_file_fails() {
    let path = write_params_file("{not json");
    let emission = run_module_from_file(&Reporter, &path);
    let _ = std::fs::remove_file(&path);
    assert!(!emission.is_success());
    assert!(body(&emission)["msg"]
        .as_str()
        .unwrap()
        .contains("could not decode parameters file"));
}

#[test]
fn non_object_params_file_fails() {
    let path = write_params_file(r#"["not", "an", "object"]"#);
    let emission = run_module_from_file(&Reporter, &path);
    let _ = std::fs::remove_file(&path);
    assert!(!emission.is_success());
    assert!(body(&emission)["msg"]
        .as_str()
        .unwrap()
        .contains("must contain a JSON object"));
}
