//! Tests for value coercion: truthiness, arithmetic operand checks,
//! required arguments and Lua's floored modulo.

extern crate luart;

use luart::runner::ds::error::RuntimeError;
use luart::runner::ds::function::Function;
use luart::runner::ds::operations::arith::modulo;
use luart::runner::ds::operations::type_conversion::{
    as_bool, require_defined, require_number, to_display_string,
};
use luart::runner::ds::table::TableRef;
use luart::runner::ds::value::Value;
use proptest::prelude::*;

// ============================================================================
// Modulo tests
// ============================================================================

mod modulo_tests {
    use super::*;

    #[test]
    fn test_negative_dividend_wraps_to_divisor_sign() {
        assert_eq!(modulo(-1.0, 10.0), 9.0);
    }

    #[test]
    fn test_negative_divisor() {
        assert_eq!(modulo(1.0, -10.0), -9.0);
    }

    #[test]
    fn test_plain_modulo() {
        assert_eq!(modulo(7.0, 3.0), 1.0);
        assert_eq!(modulo(6.0, 3.0), 0.0);
    }

    #[test]
    fn test_zero_divisor_is_nan() {
        assert!(modulo(5.0, 0.0).is_nan());
    }

    proptest! {
        #[test]
        fn prop_result_takes_sign_of_divisor(a in -1_000_000i64..1_000_000, b in 1i64..1_000) {
            let (a, b) = (a as f64, b as f64);
            let positive = modulo(a, b);
            prop_assert!(positive >= 0.0 && positive < b, "{} % {} = {}", a, b, positive);
            let negative = modulo(a, -b);
            prop_assert!(negative <= 0.0 && negative > -b, "{} % {} = {}", a, -b, negative);
        }

        #[test]
        fn prop_integer_operands_satisfy_division_identity(a in -10_000i64..10_000, b in 1i64..100) {
            let r = modulo(a as f64, b as f64);
            let q = (a as f64 / b as f64).floor();
            prop_assert_eq!(q * b as f64 + r, a as f64);
        }

        #[test]
        fn prop_fractional_operands_follow_floored_definition(
            a in -1.0e9f64..1.0e9,
            magnitude in 1.0e-3f64..1.0e3,
            negative in any::<bool>(),
        ) {
            let b = if negative { -magnitude } else { magnitude };
            let r = modulo(a, b);
            prop_assert_eq!(r, a - (a / b).floor() * b);
            prop_assert!(r == 0.0 || (r > 0.0) == (b > 0.0), "{} % {} = {}", a, b, r);
            prop_assert!(r.abs() <= b.abs(), "{} % {} = {}", a, b, r);
        }

        #[test]
        fn prop_small_magnitudes_follow_floored_definition(
            a in -1.0f64..1.0,
            magnitude in 1.0e-9f64..1.0e-3,
            negative in any::<bool>(),
        ) {
            let b = if negative { -magnitude } else { magnitude };
            let r = modulo(a, b);
            prop_assert_eq!(r, a - (a / b).floor() * b);
            prop_assert!(r == 0.0 || (r > 0.0) == (b > 0.0), "{} % {} = {}", a, b, r);
        }
    }
}

// ============================================================================
// Truthiness tests
// ============================================================================

mod truthiness_tests {
    use super::*;

    #[test]
    fn test_only_nil_and_false_are_falsy() {
        assert!(!as_bool(&Value::Nil));
        assert!(!as_bool(&Value::Boolean(false)));
    }

    #[test]
    fn test_zero_is_truthy() {
        assert!(as_bool(&Value::from(0)));
    }

    #[test]
    fn test_empty_string_is_truthy() {
        assert!(as_bool(&Value::from("")));
    }

    #[test]
    fn test_empty_table_is_truthy() {
        assert!(as_bool(&Value::Table(TableRef::new())));
    }

    #[test]
    fn test_function_is_truthy() {
        let f = Function::native("noop", |_| Ok(Value::Nil));
        assert!(as_bool(&Value::Function(f)));
    }

    #[test]
    fn test_nan_is_truthy() {
        assert!(as_bool(&Value::Number(f64::NAN)));
    }
}

// ============================================================================
// require_number tests
// ============================================================================

mod require_number_tests {
    use super::*;

    #[test]
    fn test_number_passes_through() {
        assert_eq!(require_number(&Value::from(42)).unwrap(), 42.0);
        assert_eq!(require_number(&Value::Number(-0.25)).unwrap(), -0.25);
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        assert_eq!(require_number(&Value::from("10")).unwrap(), 10.0);
        assert_eq!(require_number(&Value::from("  3.5  ")).unwrap(), 3.5);
        assert_eq!(require_number(&Value::from("0x10")).unwrap(), 16.0);
        assert_eq!(require_number(&Value::from("1e2")).unwrap(), 100.0);
    }

    #[test]
    fn test_non_numeric_string_fails() {
        assert!(matches!(
            require_number(&Value::from("abc")),
            Err(RuntimeError::TypeMismatch(_))
        ));
        assert!(matches!(
            require_number(&Value::from("10 apples")),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_nil_fails() {
        match require_number(&Value::Nil) {
            Err(RuntimeError::TypeMismatch(msg)) => assert!(msg.contains("nil"), "{}", msg),
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_table_fails() {
        assert!(matches!(
            require_number(&Value::Table(TableRef::new())),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_boolean_fails() {
        assert!(matches!(
            require_number(&Value::Boolean(true)),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }
}

// ============================================================================
// require_defined tests
// ============================================================================

mod require_defined_tests {
    use super::*;

    #[test]
    fn test_nil_is_rejected_with_parameter_name() {
        match require_defined(Value::Nil, "radius") {
            Err(RuntimeError::UndefinedArgument(msg)) => assert!(msg.contains("radius"), "{}", msg),
            other => panic!("expected UndefinedArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_false_is_defined() {
        assert_eq!(
            require_defined(Value::Boolean(false), "flag").unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_value_is_returned_unchanged() {
        let t = TableRef::new();
        let v = require_defined(Value::Table(t.clone()), "t").unwrap();
        assert_eq!(v, Value::Table(t));
    }
}

// ============================================================================
// tostring tests
// ============================================================================

mod display_tests {
    use super::*;

    #[test]
    fn test_integral_numbers_print_without_fraction() {
        assert_eq!(to_display_string(&Value::from(3)), "3");
        assert_eq!(to_display_string(&Value::Number(1e14)), "1e+14");
    }

    #[test]
    fn test_booleans_and_nil() {
        assert_eq!(to_display_string(&Value::Boolean(true)), "true");
        assert_eq!(to_display_string(&Value::Nil), "nil");
    }
}
