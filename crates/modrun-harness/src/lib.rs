//! modrun-harness: the runtime that hosts remote-execution modules.
//!
//! This crate provides:
//!
//! - **Params**: decode the JSON parameters file into a [`ParamSet`]
//! - **Resolver**: alias probing, choice checks, and type coercion
//! - **Emitter**: compact JSON result emission with exit status
//! - **Module**: the [`Module`] trait and the [`exec_module`] entry point
//!
//! A module process runs one straight line: read the parameters file,
//! resolve what it needs, build a result, emit it, exit. Library code
//! never terminates the process; every failure travels up as a value
//! and `exec_module` performs the single exit.

pub mod coerce;
pub mod emit;
pub mod module;
pub mod params;
pub mod resolve;

pub use emit::{Emission, MAX_RESULT_DEPTH};
pub use module::{exec_module, run_module, run_module_from_file, Module, ModuleSchema};
pub use params::{LoadError, ParamSet, RESERVED_PREFIX};
pub use resolve::resolve;
