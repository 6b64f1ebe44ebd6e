//! Core built-ins registration.
//!
//! This module provides the function that seeds a fresh ModuleRegistry with
//! every built-in module.

use crate::runner::ds::table::TableRef;
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::RuntimeConfig;
use crate::runner::plugin::registry::{ModuleRegistry, FFI_MODULE};

use super::base;
use super::math;

/// Name of the base-function module.
pub const GLOBALS_MODULE: &str = "_G";

/// Name of the math module.
pub const MATH_MODULE: &str = "math";

/// Register all built-in modules with the registry.
///
/// `ffi` starts empty; the host's foreign loader fills it later.
pub fn register_builtins(registry: &mut ModuleRegistry, config: &RuntimeConfig) {
    let modules = vec![
        (GLOBALS_MODULE, base::create()),
        (MATH_MODULE, math::create(config)),
        (FFI_MODULE, TableRef::new()),
    ];
    for (name, module) in modules {
        registry.seed(name, Value::Table(module));
    }
}
