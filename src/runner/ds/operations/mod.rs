pub mod arith;
pub mod call;
pub mod prototype;
pub mod table;
pub mod type_conversion;
