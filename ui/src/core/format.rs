//! Formatting helpers for presenting scalar values as display text.

const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

/// Canonical text form of a number as shown on the page.
///
/// Integral values print without a fractional part (`3`, not `3.0`),
/// negative zero prints as `0`, and non-finite values use the spelled-out
/// forms `NaN`, `Infinity` and `-Infinity`. Magnitudes from `1e21` up or
/// below `1e-6` switch to exponent form with a signed exponent (`1e+21`,
/// `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

pub fn format_bool(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_drop_fraction() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractional_and_special_numbers() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e25), "-2.5e+25");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123_456_789.0), "123456789");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn booleans() {
        assert_eq!(format_bool(true), "true");
        assert_eq!(format_bool(false), "false");
    }
}
