use crate::runner::ds::error::RuntimeError;

/// Lua's `%`: floored modulo, `a - floor(a/b)*b`.
///
/// The result takes the sign of `b` (or is zero), unlike the truncating
/// remainder of Rust's `%` which follows `a`. Division by zero is not
/// trapped: `modulo(x, 0.0)` is NaN.
pub fn modulo(a: f64, b: f64) -> f64 {
    a - (a / b).floor() * b
}

/// [`modulo`] that refuses a zero divisor instead of producing NaN.
pub fn checked_modulo(a: f64, b: f64) -> Result<f64, RuntimeError> {
    if b == 0.0 {
        Err(RuntimeError::DivisionError)
    } else {
        Ok(modulo(a, b))
    }
}

/// C `fmod`: truncated remainder, sign follows `a`. Backs `math.fmod`.
pub fn truncated_remainder(a: f64, b: f64) -> f64 {
    a % b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_positive_operands() {
        assert_eq!(modulo(7.0, 3.0), 1.0);
    }

    #[test]
    fn test_modulo_negative_dividend() {
        assert_eq!(modulo(-1.0, 10.0), 9.0);
        assert_eq!(truncated_remainder(-1.0, 10.0), -1.0);
    }

    #[test]
    fn test_modulo_negative_divisor() {
        assert_eq!(modulo(1.0, -10.0), -9.0);
        assert_eq!(modulo(-7.0, -3.0), -1.0);
    }

    #[test]
    fn test_modulo_fractional() {
        assert!((modulo(5.5, 2.0) - 1.5).abs() < 1e-12);
        assert!((modulo(-5.5, 2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_modulo_by_zero_propagates_nan() {
        assert!(modulo(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_checked_modulo_traps_zero() {
        assert!(matches!(checked_modulo(1.0, 0.0), Err(RuntimeError::DivisionError)));
        assert_eq!(checked_modulo(-1.0, 10.0).unwrap(), 9.0);
    }
}
