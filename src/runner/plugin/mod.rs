//! Module registry, foreign bindings and runtime configuration.
//!
//! ## Lifecycle
//!
//! ```text
//! startup:   Runtime::with_config(config)
//!              └─ ModuleRegistry seeded with `math`, `_G` and an empty `ffi`
//! binding:   runtime.load_foreign_bindings(&loader)   (or runtime.freeze())
//!              └─ loader attaches native functions to `ffi`
//! execution: generated code calls runtime.require("math") etc.
//! ```
//!
//! No step runs concurrently with another, so the registry needs no locking.
//! It is an ordinary value owned by the [`Runtime`] rather than a global.
//!
//! ## Example: Foreign Loader
//!
//! ```
//! use luart::runner::ds::operations::call::call;
//! use luart::runner::ds::operations::prototype::index;
//! use luart::runner::ds::value::Value;
//! use luart::runner::plugin::{FnLoader, Runtime};
//!
//! let mut runtime = Runtime::new();
//! let loader = FnLoader::new("native", |ns| {
//!     ns.bind_function("add", |args| match (&args[0], &args[1]) {
//!         (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
//!         _ => Ok(Value::Nil),
//!     });
//!     Ok(())
//! });
//! runtime.load_foreign_bindings(&loader).unwrap();
//!
//! let ffi = runtime.require("ffi").unwrap();
//! let add = index(&ffi, &Value::from("add")).unwrap();
//! assert_eq!(call(&add, vec![2.into(), 3.into()]).unwrap(), Value::from(5));
//! ```

pub mod config;
pub mod loader;
pub mod registry;
pub mod runtime;

pub use config::{ConfigError, RuntimeConfig};
pub use loader::{FnLoader, ForeignLoader, ForeignNamespace};
pub use registry::{ModuleRegistry, RegistryPhase};
pub use runtime::Runtime;
