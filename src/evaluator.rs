use crate::error::{Error, Result};
use crate::parser::{parse, BinaryOp, Expression};
use crate::tokenizer::tokenize;
use log::debug;

/// Evaluates a single `<number> <operator> <number>` expression.
pub fn evaluate(source: &str) -> Result<f64> {
    let tokens = tokenize(source)?;
    let expr = parse(&tokens)?;
    let result = apply(&expr);
    debug!("{} => {:?}", expr, result);
    result
}

fn apply(expr: &Expression) -> Result<f64> {
    let Expression {
        left: a,
        operator,
        right: b,
    } = *expr;

    if operator.divides() && b == 0.0 {
        return Err(Error::DivisionByZero);
    }

    Ok(match operator {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => a / b,
        BinaryOp::FloorDivide => divmod(a, b).0,
        BinaryOp::Modulo => divmod(a, b).1,
        BinaryOp::Power => a.powf(b),
    })
}

/// Floored quotient and remainder. The remainder takes the sign of the
/// divisor, and the quotient is derived from `fmod` rather than from `a / b`
/// so the pair stays consistent when the true quotient rounds up to an integer.
fn divmod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;

    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(b);
    }

    let quot = if div != 0.0 {
        let floor = div.floor();
        if div - floor > 0.5 {
            floor + 1.0
        } else {
            floor
        }
    } else {
        0.0_f64.copysign(a / b)
    };

    (quot, rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() -> Result<()> {
        assert_eq!(evaluate("2 + 3")?, 5.0);
        assert_eq!(evaluate("10 - 4.5")?, 5.5);
        assert_eq!(evaluate("7 * 8")?, 56.0);
        assert_eq!(evaluate("9 / 2")?, 4.5);
        assert_eq!(evaluate("9 // 2")?, 4.0);
        assert_eq!(evaluate("10 % 3")?, 1.0);
        assert_eq!(evaluate("2 ** 8")?, 256.0);
        assert_eq!(evaluate("  -1.5+-1.5  ")?, -3.0);
        Ok(())
    }

    #[test]
    fn test_division_by_zero() {
        for source in ["5 / 0", "5 // 0", "5 % 0", "5 / 0.0", "0 % -0", "-3.5 // 0.00"] {
            assert!(
                matches!(evaluate(source), Err(Error::DivisionByZero)),
                "{:?} should divide by zero",
                source
            );
        }
    }

    #[test]
    fn test_zero_divisor_only_matters_for_division() -> Result<()> {
        assert_eq!(evaluate("5 + 0")?, 5.0);
        assert_eq!(evaluate("5 - 0")?, 5.0);
        assert_eq!(evaluate("5 * 0")?, 0.0);
        assert_eq!(evaluate("5 ** 0")?, 1.0);
        assert_eq!(evaluate("0 ** 0")?, 1.0);
        Ok(())
    }

    #[test]
    fn test_floor_division_and_modulo_signs() -> Result<()> {
        assert_eq!(evaluate("-7 // 2")?, -4.0);
        assert_eq!(evaluate("-7 % 2")?, 1.0);
        assert_eq!(evaluate("7 // -2")?, -4.0);
        assert_eq!(evaluate("7 % -2")?, -1.0);
        assert_eq!(evaluate("-7 // -2")?, 3.0);
        assert_eq!(evaluate("-7 % -2")?, -1.0);
        assert_eq!(evaluate("-7.5 % 2")?, 0.5);

        // Remainder of zero carries the divisor's sign
        assert!(evaluate("4 % -2")?.is_sign_negative());
        assert!(evaluate("-4 % 2")?.is_sign_positive());

        Ok(())
    }

    #[test]
    fn test_floor_division_uses_fmod() -> Result<()> {
        // 1 / 0.1 rounds to exactly 10.0, but 0.1 is slightly above one tenth
        assert_eq!(evaluate("1 // 0.1")?, 9.0);
        let rem = evaluate("1 % 0.1")?;
        assert!((rem - 0.1).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_power_edge_cases() -> Result<()> {
        assert_eq!(evaluate("2 ** -1")?, 0.5);
        assert!((evaluate("2 ** 0.5")? - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(evaluate("-8 ** 0.5")?.is_nan());
        assert_eq!(evaluate("0 ** -1")?, f64::INFINITY);
        assert_eq!(evaluate("10 ** 400")?, f64::INFINITY);
        Ok(())
    }

    #[test]
    fn test_malformed_input() {
        for source in ["banana", "", "   ", "2 +", "2 + 3 + 4", "2 ^ 3", "2 x 3", "(2 + 3)"] {
            assert!(
                matches!(evaluate(source), Err(Error::MalformedExpression)),
                "{:?} should be malformed",
                source
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            evaluate("5 / 0").unwrap_err().to_string(),
            "Division by zero is not allowed"
        );
        assert_eq!(
            evaluate("banana").unwrap_err().to_string(),
            "Invalid format. Use: <number> <operator> <number> (try 'help')"
        );
    }
}
