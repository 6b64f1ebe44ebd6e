//! Module registry backing `require`.
//!
//! The registry is written in exactly two phases and then frozen:
//!
//! ```text
//! Seeding ──finish_seeding()──▶ AwaitingBindings ──load_foreign_bindings()──▶ Frozen
//!                                      └───────────────freeze()──────────────────┘
//! ```
//!
//! Built-ins go in during `Seeding`. The host's foreign loader fills the
//! `ffi` module during `AwaitingBindings`. Generated code only ever reads.

use std::collections::HashMap;

use tracing::debug;

use super::config::RuntimeConfig;
use super::loader::{ForeignLoader, ForeignNamespace};
use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::value::Value;
use crate::runner::std_lib::register_builtins;

/// Name under which the foreign-function namespace is registered.
pub const FFI_MODULE: &str = "ffi";

/// Lifecycle of a [`ModuleRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPhase {
    /// Built-ins may be registered.
    Seeding,
    /// Registration is closed; the foreign loader may run once.
    AwaitingBindings,
    /// Read-only for the rest of the process.
    Frozen,
}

/// Name to module lookup for `require`.
pub struct ModuleRegistry {
    /// All registered modules.
    modules: HashMap<String, Value>,

    /// Current lifecycle phase.
    phase: RegistryPhase,

    /// Name of the loader that populated `ffi`, once it has run.
    foreign_loader: Option<String>,
}

impl ModuleRegistry {
    /// Create an empty registry in the seeding phase.
    pub fn new() -> Self {
        ModuleRegistry {
            modules: HashMap::new(),
            phase: RegistryPhase::Seeding,
            foreign_loader: None,
        }
    }

    /// Create a registry seeded with `math`, `_G` and an empty `ffi`, ready for the
    /// foreign binding phase.
    pub fn with_builtins(config: &RuntimeConfig) -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry, config);
        registry.finish_seeding();
        registry
    }

    /// Register a module. Only allowed while seeding; a name registered twice
    /// keeps the later module.
    pub fn register(&mut self, name: impl Into<String>, module: Value) -> Result<(), RuntimeError> {
        let name = name.into();
        if self.phase != RegistryPhase::Seeding {
            return Err(RuntimeError::RegistryLocked(format!(
                "cannot register module '{}' after seeding",
                name
            )));
        }
        self.seed(name, module);
        Ok(())
    }

    /// Insert a module without the phase check. Used while building
    /// built-ins, before the registry is handed out.
    pub(crate) fn seed(&mut self, name: impl Into<String>, module: Value) {
        let name = name.into();
        debug!(module = %name, "registered module");
        self.modules.insert(name, module);
    }

    /// Close the seeding phase.
    pub fn finish_seeding(&mut self) {
        if self.phase == RegistryPhase::Seeding {
            self.phase = RegistryPhase::AwaitingBindings;
            debug!(modules = self.modules.len(), "module registry seeded");
        }
    }

    /// Run the host's foreign loader against the `ffi` module, then freeze.
    ///
    /// Allowed once, after seeding. If the loader fails nothing is attached
    /// and the registry stays in [`RegistryPhase::AwaitingBindings`].
    pub fn load_foreign_bindings(&mut self, loader: &dyn ForeignLoader) -> Result<(), RuntimeError> {
        match self.phase {
            RegistryPhase::AwaitingBindings => {}
            RegistryPhase::Seeding => {
                return Err(RuntimeError::RegistryLocked(
                    "foreign bindings must be loaded after seeding".to_string(),
                ))
            }
            RegistryPhase::Frozen => {
                return Err(RuntimeError::RegistryLocked(match &self.foreign_loader {
                    Some(previous) => format!("foreign bindings already loaded by '{}'", previous),
                    None => "registry is frozen".to_string(),
                }))
            }
        }
        let ffi = match self.modules.get(FFI_MODULE) {
            Some(Value::Table(t)) => t.clone(),
            _ => return Err(RuntimeError::ModuleNotFound(FFI_MODULE.to_string())),
        };

        let mut namespace = ForeignNamespace::new();
        loader.bind(&mut namespace)?;
        debug!(
            loader = loader.name(),
            bindings = namespace.names().len(),
            "foreign bindings loaded"
        );
        namespace.commit(&ffi);

        self.foreign_loader = Some(loader.name().to_string());
        self.phase = RegistryPhase::Frozen;
        Ok(())
    }

    /// Skip the foreign binding phase and make the registry read-only.
    pub fn freeze(&mut self) {
        if self.phase != RegistryPhase::Frozen {
            self.phase = RegistryPhase::Frozen;
            debug!("module registry frozen");
        }
    }

    /// `require(name)`.
    pub fn require(&self, name: &str) -> Result<Value, RuntimeError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::ModuleNotFound(name.to_string()))
    }

    /// Check if a module is registered.
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Get list of all registered module names.
    pub fn module_names(&self) -> Vec<&String> {
        self.modules.keys().collect()
    }

    pub fn phase(&self) -> RegistryPhase {
        self.phase
    }

    /// Name of the loader that populated `ffi`, if any ran.
    pub fn foreign_loader(&self) -> Option<&str> {
        self.foreign_loader.as_deref()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
