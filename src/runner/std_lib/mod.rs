//! Standard library built-in modules.
//!
//! This module contains the built-in modules a fresh registry is seeded
//! with: `math`, the base functions under `_G`, and the empty `ffi`
//! namespace.

pub mod base;
pub mod core;
pub mod math;

pub use self::core::register_builtins;
