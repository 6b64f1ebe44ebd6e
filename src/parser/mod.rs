mod api;

pub use api::{parse_numeric_string, NumericParser};
