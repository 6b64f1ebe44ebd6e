//! Math built-in module.
//!
//! Provides the subset of Lua's `math` library that generated code uses.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::function::{Function, NativeFn};
use crate::runner::ds::operations::arith::truncated_remainder;
use crate::runner::ds::operations::type_conversion::{require_number, type_name};
use crate::runner::ds::table::TableRef;
use crate::runner::ds::value::Value;
use crate::runner::plugin::config::RuntimeConfig;

/// Build the `math` module table.
pub fn create(config: &RuntimeConfig) -> TableRef {
    let math = TableRef::new();
    // Constants
    math.set_field("pi", std::f64::consts::PI);
    math.set_field("huge", f64::INFINITY);
    // Functions
    let functions: [(&str, NativeFn); 11] = [
        ("floor", math_floor),
        ("ceil", math_ceil),
        ("abs", math_abs),
        ("sqrt", math_sqrt),
        ("sin", math_sin),
        ("cos", math_cos),
        ("tan", math_tan),
        ("pow", math_pow),
        ("fmod", math_fmod),
        ("max", math_max),
        ("min", math_min),
    ];
    for &(name, func) in functions.iter() {
        math.set_field(name, Function::native(name, func));
    }
    math.set_field("random", make_random(config.runtime.random_seed));
    math
}

/// Fetch argument `position` (zero-based) of `function` as a number.
fn number_arg(args: &[Value], position: usize, function: &str) -> Result<f64, RuntimeError> {
    match args.get(position) {
        None => Err(RuntimeError::UndefinedArgument(format!(
            "bad argument #{} to '{}' (number expected, got no value)",
            position + 1,
            function
        ))),
        Some(Value::Nil) => Err(RuntimeError::UndefinedArgument(format!(
            "bad argument #{} to '{}' (number expected, got nil)",
            position + 1,
            function
        ))),
        Some(v) => require_number(v).map_err(|_| {
            RuntimeError::type_mismatch(format!(
                "bad argument #{} to '{}' (number expected, got {})",
                position + 1,
                function,
                type_name(v)
            ))
        }),
    }
}

fn unary(args: &[Value], function: &str, op: fn(f64) -> f64) -> Result<Value, RuntimeError> {
    Ok(Value::Number(op(number_arg(args, 0, function)?)))
}

/// math.floor
fn math_floor(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "floor", f64::floor)
}

/// math.ceil
fn math_ceil(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "ceil", f64::ceil)
}

/// math.abs
fn math_abs(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "abs", f64::abs)
}

/// math.sqrt
fn math_sqrt(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "sqrt", f64::sqrt)
}

/// math.sin
fn math_sin(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "sin", f64::sin)
}

/// math.cos
fn math_cos(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "cos", f64::cos)
}

/// math.tan
fn math_tan(args: Vec<Value>) -> Result<Value, RuntimeError> {
    unary(&args, "tan", f64::tan)
}

/// math.pow
fn math_pow(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let base = number_arg(&args, 0, "pow")?;
    let exponent = number_arg(&args, 1, "pow")?;
    Ok(Value::Number(base.powf(exponent)))
}

/// math.fmod - remainder truncated toward zero, unlike `%`.
fn math_fmod(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let a = number_arg(&args, 0, "fmod")?;
    let b = number_arg(&args, 1, "fmod")?;
    Ok(Value::Number(truncated_remainder(a, b)))
}

/// math.max - at least one argument is required.
fn math_max(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let mut result = number_arg(&args, 0, "max")?;
    for i in 1..args.len() {
        let x = number_arg(&args, i, "max")?;
        if x > result {
            result = x;
        }
    }
    Ok(Value::Number(result))
}

/// math.min - at least one argument is required.
fn math_min(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let mut result = number_arg(&args, 0, "min")?;
    for i in 1..args.len() {
        let x = number_arg(&args, i, "min")?;
        if x < result {
            result = x;
        }
    }
    Ok(Value::Number(result))
}

fn make_random(seed: Option<u64>) -> Value {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let rng = Rc::new(RefCell::new(rng));
    Value::Function(Function::closure("random", move |args| {
        random_with(&mut *rng.borrow_mut(), &args)
    }))
}

/// Fetch argument `position` of `random` as an integer bound. Fractions are
/// floored; NaN, infinities and values outside `i64` are rejected.
fn integer_arg(args: &[Value], position: usize) -> Result<i64, RuntimeError> {
    let n = number_arg(args, position, "random")?.floor();
    // `i64::MIN as f64` is exact and `i64::MAX as f64` rounds up to 2^63.
    if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(RuntimeError::type_mismatch(format!(
            "bad argument #{} to 'random' (number has no integer representation)",
            position + 1
        )))
    }
}

/// math.random, drawing from `rng`.
///
/// - `random()`: float in `[0, 1)`
/// - `random(m)`: integer in `[1, m]`
/// - `random(lo, hi)`: integer in `[lo, hi)`, never `hi`
///
/// The upper bound is inclusive for one argument and exclusive for two.
/// Arguments are floored; a trailing `nil` counts as absent.
pub fn random_with<R: Rng>(rng: &mut R, args: &[Value]) -> Result<Value, RuntimeError> {
    let given = args.iter().rposition(|v| !v.is_nil()).map_or(0, |i| i + 1);
    match given {
        0 => Ok(Value::Number(rng.gen::<f64>())),
        1 => {
            let upper = integer_arg(args, 0)?;
            if upper < 1 {
                return Err(RuntimeError::type_mismatch(
                    "bad argument #1 to 'random' (interval is empty)",
                ));
            }
            Ok(Value::Number(rng.gen_range(1..=upper) as f64))
        }
        2 => {
            let lower = integer_arg(args, 0)?;
            let upper = integer_arg(args, 1)?;
            if upper <= lower {
                return Err(RuntimeError::type_mismatch(
                    "bad argument #2 to 'random' (interval is empty)",
                ));
            }
            Ok(Value::Number(rng.gen_range(lower..upper) as f64))
        }
        _ => Err(RuntimeError::type_mismatch(
            "wrong number of arguments to 'random'",
        )),
    }
}
