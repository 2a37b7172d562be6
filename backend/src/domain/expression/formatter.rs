//! Canonical presentation of evaluation results.

use super::number::{Number, round_to_digits};

/// Decimal places kept for non-integral results.
const RESULT_DECIMALS: i64 = 10;

/// Collapse integral floats to integers and round everything else to
/// [`RESULT_DECIMALS`] places.
///
/// Integral floats outside the `i64` range stay floats.
pub(super) fn format_result(value: Number) -> Number {
    match value {
        Number::Integer(_) => value,
        Number::Float(float) => Number::integral_float_to_integer(float).map_or_else(
            || Number::Float(round_to_digits(float, RESULT_DECIMALS)),
            Number::Integer,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Number::Integer(42), Number::Integer(42))]
    #[case(Number::Float(5.0), Number::Integer(5))]
    #[case(Number::Float(-0.0), Number::Integer(0))]
    #[case(Number::Float(2.5), Number::Float(2.5))]
    #[case(Number::Float(0.1 + 0.2), Number::Float(0.3))]
    #[case(Number::Float(1.0 / 3.0), Number::Float(0.333_333_333_3))]
    #[case(Number::Float(1e30), Number::Float(1e30))]
    #[case(Number::Float(1.000_000_000_05), Number::Float(1.000_000_000_1))]
    fn formats_results(#[case] value: Number, #[case] expected: Number) {
        assert_eq!(format_result(value), expected);
    }
}
