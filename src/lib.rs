//! # luart - runtime semantics layer for transpiled Lua
//!
//! Code emitted by a Lua-to-host compiler cannot lean on the host's own
//! collection, truthiness or modulo rules, because they disagree with Lua's.
//! Every table construction, table access, iteration, inheritance setup,
//! module import and ambiguous call site in generated code calls into this
//! crate instead.
//!
//! ## Quick Start
//!
//! ```
//! use luart::runner::ds::operations::call::method_call;
//! use luart::runner::ds::operations::prototype::{index, set_fallback};
//! use luart::runner::ds::operations::table::array_len;
//! use luart::runner::ds::function::Function;
//! use luart::runner::ds::table::TableRef;
//! use luart::runner::ds::value::Value;
//! use luart::runner::plugin::runtime::Runtime;
//!
//! let runtime = Runtime::new();
//! let math = runtime.require("math").unwrap();
//! let pi = index(&math, &Value::from("pi")).unwrap();
//! assert_eq!(pi, Value::Number(std::f64::consts::PI));
//!
//! // local list = {10, 20, 30}; print(#list)
//! let list = TableRef::from_sequence(vec![Value::from(10), Value::from(20), Value::from(30)]);
//! assert_eq!(array_len(&list), 3);
//!
//! // local Base = {}; function Base:name() return "base" end
//! let base = TableRef::new();
//! base.set_field("name", Function::native("name", |_args| Ok(Value::from("base"))));
//! // local obj = setmetatable({}, {__index = Base})
//! let metatable = TableRef::new();
//! metatable.set_field("__index", base);
//! let obj = set_fallback(&Value::Table(TableRef::new()), &Value::Table(metatable)).unwrap();
//! // obj:name()
//! assert_eq!(method_call(obj, "name", vec![]).unwrap(), Value::from("base"));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar for Lua numeric strings
//! - **[`runner`]** - Runtime support for generated code
//!   - **[`runner::ds`]** - Values, tables, functions and the operations on them
//!   - **[`runner::plugin`]** - Module registry, foreign bindings, runtime config
//!   - **[`runner::std_lib`]** - Built-in `math`, `ffi` and base functions

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
