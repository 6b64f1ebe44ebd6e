//! Data structures shared by every runtime operation: the value model, the
//! table container, callable functions and the error type.

pub mod error;
pub mod function;
pub mod operations;
pub mod table;
pub mod value;
