/// Renders a result for display. Integral values drop the fractional part,
/// values below 1e-4 in magnitude use scientific notation, and everything
/// else uses the shortest decimal that round-trips.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Also covers -0.0
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 {
        // A precision forces the exact expansion instead of padded digits
        format!("{:.0}", n)
    } else if n.abs() < 1e-4 {
        scientific(n)
    } else {
        n.to_string()
    }
}

/// Shortest round-trip mantissa with a signed, two-digit-minimum exponent,
/// e.g. `1e-05` and `-2.5e-300`.
fn scientific(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(256.0), "256");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2f64.powi(100)), "1267650600228229401496703205376");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00012), "0.00012");
    }

    #[test]
    fn test_tiny_values_use_exponent() {
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(1.5e-7), "1.5e-07");
        assert_eq!(format_number(-2.5e-300), "-2.5e-300");
        assert_eq!(format_number(1e-300), "1e-300");
        assert_eq!(format_number(5e-324), "5e-324");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
