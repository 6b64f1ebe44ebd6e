//! Process-scoped runtime context handed to generated code.

use std::path::Path;

use super::config::{ConfigError, RuntimeConfig};
use super::loader::ForeignLoader;
use super::registry::ModuleRegistry;
use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::operations::arith::{checked_modulo, modulo};
use crate::runner::ds::operations::type_conversion::require_number;
use crate::runner::ds::value::Value;

/// Everything generated code needs that is not a pure function: the
/// configuration and the module registry.
///
/// Created once at startup; the host runs its foreign loader (or calls
/// [`Runtime::freeze`]) before handing it to generated code.
pub struct Runtime {
    config: RuntimeConfig,
    registry: ModuleRegistry,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let registry = ModuleRegistry::with_builtins(&config);
        Runtime { config, registry }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::with_config(RuntimeConfig::load(path)?))
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    /// `require(name)`.
    pub fn require(&self, name: &str) -> Result<Value, RuntimeError> {
        self.registry.require(name)
    }

    pub fn load_foreign_bindings(&mut self, loader: &dyn ForeignLoader) -> Result<(), RuntimeError> {
        self.registry.load_foreign_bindings(loader)
    }

    pub fn freeze(&mut self) {
        self.registry.freeze()
    }

    /// `a % b` on script values: both operands coerced as numbers, then
    /// floored modulo. Zero divisors trap only when the config asks for it.
    pub fn modulo(&self, a: &Value, b: &Value) -> Result<Value, RuntimeError> {
        let a = require_number(a)?;
        let b = require_number(b)?;
        let result = if self.config.runtime.trap_division_by_zero {
            checked_modulo(a, b)?
        } else {
            modulo(a, b)
        };
        Ok(Value::Number(result))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
