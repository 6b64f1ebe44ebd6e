//! Tests for the module registry lifecycle, foreign bindings and the runtime
//! context.

extern crate luart;

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use luart::runner::ds::error::RuntimeError;
use luart::runner::ds::operations::call::call;
use luart::runner::ds::operations::prototype::index;
use luart::runner::ds::value::Value;
use luart::runner::plugin::{
    FnLoader, ForeignLoader, ForeignNamespace, ModuleRegistry, RegistryPhase, Runtime,
    RuntimeConfig,
};

fn ffi_field(runtime: &Runtime, name: &str) -> Value {
    let ffi = runtime.require("ffi").unwrap();
    index(&ffi, &Value::from(name)).unwrap()
}

fn double(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(n * 2.0)),
        _ => Ok(Value::Nil),
    }
}

/// Loader that records how often it ran.
struct CountingLoader {
    runs: Rc<Cell<u32>>,
}

impl ForeignLoader for CountingLoader {
    fn bind(&self, namespace: &mut ForeignNamespace) -> Result<(), RuntimeError> {
        self.runs.set(self.runs.get() + 1);
        namespace.bind_function("double", double);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

// ============================================================================
// Registry phase tests
// ============================================================================

mod phase_tests {
    use super::*;

    #[test]
    fn test_fresh_registry_is_seeding() {
        let registry = ModuleRegistry::new();
        assert_eq!(registry.phase(), RegistryPhase::Seeding);
        assert!(registry.module_names().is_empty());
    }

    #[test]
    fn test_default_matches_new() {
        let registry = ModuleRegistry::default();
        assert_eq!(registry.phase(), RegistryPhase::Seeding);
        assert!(registry.module_names().is_empty());
    }

    #[test]
    fn test_register_then_require() {
        let mut registry = ModuleRegistry::new();
        registry.register("answer", Value::from(42)).unwrap();
        assert_eq!(registry.require("answer").unwrap(), Value::from(42));
        assert!(registry.has_module("answer"));
    }

    #[test]
    fn test_register_twice_keeps_later() {
        let mut registry = ModuleRegistry::new();
        registry.register("m", Value::from(1)).unwrap();
        registry.register("m", Value::from(2)).unwrap();
        assert_eq!(registry.require("m").unwrap(), Value::from(2));
    }

    #[test]
    fn test_register_after_seeding_is_locked() {
        let mut registry = ModuleRegistry::new();
        registry.finish_seeding();
        assert_eq!(registry.phase(), RegistryPhase::AwaitingBindings);
        assert!(matches!(
            registry.register("late", Value::Nil),
            Err(RuntimeError::RegistryLocked(_))
        ));
    }

    #[test]
    fn test_builtins_are_seeded() {
        let registry = ModuleRegistry::with_builtins(&RuntimeConfig::default());
        assert_eq!(registry.phase(), RegistryPhase::AwaitingBindings);
        for name in &["math", "ffi", "_G"] {
            assert!(registry.has_module(name), "missing {}", name);
        }
    }

    #[test]
    fn test_unknown_module() {
        let runtime = Runtime::new();
        match runtime.require("socket") {
            Err(RuntimeError::ModuleNotFound(name)) => assert_eq!(name, "socket"),
            other => panic!("expected ModuleNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_require_returns_same_table_each_time() {
        let runtime = Runtime::new();
        assert_eq!(runtime.require("math").unwrap(), runtime.require("math").unwrap());
    }

    #[test]
    fn test_freeze_without_loader() {
        let mut runtime = Runtime::new();
        runtime.freeze();
        assert_eq!(runtime.registry().phase(), RegistryPhase::Frozen);
        assert!(runtime.require("math").is_ok());
        let loader = FnLoader::new("late", |_| Ok(()));
        assert!(matches!(
            runtime.load_foreign_bindings(&loader),
            Err(RuntimeError::RegistryLocked(_))
        ));
    }
}

// ============================================================================
// Foreign binding tests
// ============================================================================

mod foreign_tests {
    use super::*;

    #[test]
    fn test_ffi_starts_empty() {
        let runtime = Runtime::new();
        let ffi = runtime.require("ffi").unwrap();
        assert_eq!(ffi.as_table().unwrap().borrow().key_count(), 0);
    }

    #[test]
    fn test_bound_function_is_callable() {
        let mut runtime = Runtime::new();
        let runs = Rc::new(Cell::new(0));
        runtime
            .load_foreign_bindings(&CountingLoader { runs: runs.clone() })
            .unwrap();

        let f = ffi_field(&runtime, "double");
        assert_eq!(call(&f, vec![Value::from(21)]).unwrap(), Value::from(42));
        assert_eq!(runs.get(), 1);
        assert_eq!(runtime.registry().phase(), RegistryPhase::Frozen);
        assert_eq!(runtime.registry().foreign_loader(), Some("counting"));
    }

    #[test]
    fn test_loader_runs_only_once() {
        let mut runtime = Runtime::new();
        let runs = Rc::new(Cell::new(0));
        let loader = CountingLoader { runs: runs.clone() };
        runtime.load_foreign_bindings(&loader).unwrap();
        match runtime.load_foreign_bindings(&loader) {
            Err(RuntimeError::RegistryLocked(msg)) => assert!(msg.contains("counting"), "{}", msg),
            other => panic!("expected RegistryLocked, got {:?}", other),
        }
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_loading_before_seeding_finished() {
        let mut registry = ModuleRegistry::new();
        let loader = FnLoader::new("early", |_| Ok(()));
        assert!(matches!(
            registry.load_foreign_bindings(&loader),
            Err(RuntimeError::RegistryLocked(_))
        ));
    }

    #[test]
    fn test_registry_without_ffi() {
        let mut registry = ModuleRegistry::new();
        registry.finish_seeding();
        let loader = FnLoader::new("orphan", |_| Ok(()));
        assert!(matches!(
            registry.load_foreign_bindings(&loader),
            Err(RuntimeError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn test_failing_loader_attaches_nothing() {
        let mut runtime = Runtime::new();
        let loader = FnLoader::new("broken", |ns| {
            ns.bind_function("double", double);
            Err(RuntimeError::type_mismatch("host library missing"))
        });
        assert!(runtime.load_foreign_bindings(&loader).is_err());
        assert_eq!(ffi_field(&runtime, "double"), Value::Nil);
        assert_eq!(runtime.registry().phase(), RegistryPhase::AwaitingBindings);

        // A later loader may still run.
        let retry = FnLoader::new("fixed", |ns| {
            ns.bind_function("double", double);
            Ok(())
        });
        runtime.load_foreign_bindings(&retry).unwrap();
        assert_ne!(ffi_field(&runtime, "double"), Value::Nil);
    }

    #[test]
    fn test_closure_and_value_bindings() {
        let mut runtime = Runtime::new();
        let loader = FnLoader::new("mixed", |ns| {
            let offset = 10.0;
            ns.bind_closure("shift", move |args| {
                Ok(Value::Number(args[0].as_number().unwrap_or(0.0) + offset))
            });
            ns.bind_value("version", Value::from("1.2"));
            Ok(())
        });
        runtime.load_foreign_bindings(&loader).unwrap();
        let shift = ffi_field(&runtime, "shift");
        assert_eq!(call(&shift, vec![Value::from(1)]).unwrap(), Value::from(11));
        assert_eq!(ffi_field(&runtime, "version"), Value::from("1.2"));
    }

    #[test]
    fn test_rebinding_keeps_last_value() {
        let mut runtime = Runtime::new();
        let loader = FnLoader::new("twice", |ns| {
            ns.bind_value("x", Value::from(1));
            ns.bind_value("x", Value::from(2));
            assert_eq!(ns.names().len(), 1);
            Ok(())
        });
        runtime.load_foreign_bindings(&loader).unwrap();
        assert_eq!(ffi_field(&runtime, "x"), Value::from(2));
    }
}

// ============================================================================
// Runtime context tests
// ============================================================================

mod runtime_tests {
    use super::*;

    #[test]
    fn test_modulo_on_values() {
        let runtime = Runtime::new();
        assert_eq!(
            runtime.modulo(&Value::from(-1), &Value::from(10)).unwrap(),
            Value::from(9)
        );
        assert_eq!(
            runtime.modulo(&Value::from("7"), &Value::from(3)).unwrap(),
            Value::from(1)
        );
    }

    #[test]
    fn test_modulo_rejects_non_numbers() {
        let runtime = Runtime::new();
        assert!(matches!(
            runtime.modulo(&Value::Nil, &Value::from(3)),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_modulo_by_zero_default_is_nan() {
        let runtime = Runtime::new();
        let result = runtime.modulo(&Value::from(1), &Value::from(0)).unwrap();
        assert!(result.as_number().unwrap().is_nan());
    }

    #[test]
    fn test_modulo_by_zero_trapped() {
        let runtime = Runtime::with_config(RuntimeConfig::new().with_division_trap(true));
        assert!(matches!(
            runtime.modulo(&Value::from(1), &Value::from(0)),
            Err(RuntimeError::DivisionError)
        ));
    }

    #[test]
    fn test_from_config_file() {
        let path = std::env::temp_dir().join(format!("luart-test-{}.toml", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "[runtime]\nrandom_seed = 5\ntrap_division_by_zero = true").unwrap();
        }
        let runtime = Runtime::from_config_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(runtime.config().runtime.random_seed, Some(5));
        assert!(runtime.config().runtime.trap_division_by_zero);
    }
}
