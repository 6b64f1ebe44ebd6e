use crate::parser::parse_numeric_string;
use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::value::Value;

pub const TYPE_STR_NIL: &str = "nil";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_TABLE: &str = "table";
pub const TYPE_STR_FUNCTION: &str = "function";

/// Lua's `type(v)`.
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Nil => TYPE_STR_NIL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::Number(_) => TYPE_STR_NUMBER,
        Value::String(_) => TYPE_STR_STRING,
        Value::Table(_) => TYPE_STR_TABLE,
        Value::Function(_) => TYPE_STR_FUNCTION,
    }
}

/// Lua truthiness: only `false` and `nil` are false. `0`, `""` and `{}` are
/// all true, unlike in most hosts.
pub fn as_bool(v: &Value) -> bool {
    !matches!(v, Value::Nil | Value::Boolean(false))
}

/// Arithmetic operand check. Numbers pass through; strings holding exactly
/// one numeric literal are converted; everything else is a TypeMismatch.
pub fn require_number(v: &Value) -> Result<f64, RuntimeError> {
    match v {
        Value::Number(n) => Ok(*n),
        Value::String(s) => parse_numeric_string(s).ok_or_else(|| {
            RuntimeError::type_mismatch(format!(
                "attempt to perform arithmetic on a string value ({:?})",
                s
            ))
        }),
        other => Err(RuntimeError::type_mismatch(format!(
            "attempt to perform arithmetic on a {} value ({})",
            type_name(other),
            other
        ))),
    }
}

/// Call-boundary check for parameters the script declares as required.
pub fn require_defined(v: Value, parameter: &str) -> Result<Value, RuntimeError> {
    if v.is_nil() {
        Err(RuntimeError::UndefinedArgument(format!(
            "required argument '{}' is nil",
            parameter
        )))
    } else {
        Ok(v)
    }
}

/// Lua's `tostring(v)`.
pub fn to_display_string(v: &Value) -> String {
    v.to_string()
}

/// Formats a number the way Lua's `%.14g` does: integral values without a
/// fraction, at most 14 significant digits, exponent form outside
/// `1e-4 <= |n| < 1e14`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return if n.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e14 {
        if n == 0.0 && n.is_sign_negative() {
            return "-0".to_string();
        }
        return format!("{}", n as i64);
    }
    let scientific = format!("{:.13e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= 14 {
        format!(
            "{}e{}{:02}",
            trim_fraction_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (13 - exponent).max(0) as usize;
        trim_fraction_zeros(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
