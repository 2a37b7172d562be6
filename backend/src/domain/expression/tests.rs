//! End-to-end checks for the expression pipeline.

use super::*;
use rstest::rstest;

#[rstest]
#[case("2+2", Number::Integer(4))]
#[case("10/2", Number::Integer(5))]
#[case("10/4", Number::Float(2.5))]
#[case("2^10", Number::Integer(1024))]
#[case("2^3^2", Number::Integer(512))]
#[case("-2^2", Number::Integer(-4))]
#[case("(1+2)*3", Number::Integer(9))]
#[case("abs(-5)", Number::Integer(5))]
#[case("max(3, 7, 5)", Number::Integer(7))]
#[case("min(3, 7, 5)", Number::Integer(3))]
#[case("round(2.5)", Number::Integer(2))]
#[case("0.1+0.2", Number::Float(0.3))]
#[case("pi", Number::Float(3.141_592_653_6))]
#[case("2*e", Number::Float(5.436_563_656_9))]
#[case("2^0.5", Number::Float(1.414_213_562_4))]
#[case("2^-1", Number::Float(0.5))]
#[case("  7 * 6  ", Number::Integer(42))]
#[case("1.00000000005", Number::Float(1.000_000_000_1))]
#[case("round(2.675, 2)", Number::Float(2.67))]
#[case("1_000 + 1", Number::Integer(1001))]
fn basic_expressions(#[case] raw: &str, #[case] expected: Number) {
    assert_eq!(evaluate(raw, CalculationMode::Basic), Ok(expected));
}

#[rstest]
#[case("sin(90)", Number::Integer(1))]
#[case("cos(0)", Number::Integer(1))]
#[case("sin(0)", Number::Integer(0))]
#[case("log(100)", Number::Integer(2))]
#[case("ln(1)", Number::Integer(0))]
#[case("sqrt(16)", Number::Integer(4))]
#[case("sqrt(2)", Number::Float(1.414_213_562_4))]
#[case("sqrt(16)+log(1000)", Number::Integer(7))]
#[case("2^10", Number::Integer(1024))]
fn scientific_expressions(#[case] raw: &str, #[case] expected: Number) {
    assert_eq!(evaluate(raw, CalculationMode::Scientific), Ok(expected));
}

#[rstest]
#[case("10/0", CalculationMode::Basic, "Division by zero")]
#[case("0^-1", CalculationMode::Basic, "Division by zero")]
#[case("sqrt(-1)", CalculationMode::Scientific, "Math error: math domain error")]
#[case("log(0)", CalculationMode::Scientific, "Math error: math domain error")]
#[case(
    "sqrt(16)",
    CalculationMode::Basic,
    "Invalid expression: name 'sqrt' is not defined"
)]
#[case(
    "(-8)^(1/3)",
    CalculationMode::Basic,
    "Invalid expression: complex results are not supported"
)]
#[case(
    "10.0^400",
    CalculationMode::Basic,
    "Invalid expression: numerical result out of range"
)]
#[case(
    "1E400",
    CalculationMode::Basic,
    "Invalid expression: numerical result out of range"
)]
fn failures_map_to_client_messages(
    #[case] raw: &str,
    #[case] mode: CalculationMode,
    #[case] message: &str,
) {
    let err = evaluate(raw, mode).expect_err("evaluation fails");
    assert_eq!(err.client_message(), message);
}

#[rstest]
#[case("")]
#[case("import os")]
#[case("__import__('os')")]
#[case("open(\"/etc/passwd\")")]
#[case("[1, 2]")]
#[case("lambda: 1")]
#[case("1 if 1 else 2")]
fn non_arithmetic_input_is_rejected(#[case] raw: &str) {
    let err = evaluate(raw, CalculationMode::Basic).expect_err("rejected");
    assert_eq!(err.failure(), EvaluationFailure::InvalidExpression);
    assert!(err.client_message().starts_with("Invalid expression: "));
}

#[rstest]
fn unknown_functions_are_undefined_names() {
    assert_eq!(
        evaluate("pow(2, 3)", CalculationMode::Basic),
        Err(EvaluationError::undefined_name("pow"))
    );
}

#[rstest]
fn qualified_helpers_can_be_called_directly() {
    assert_eq!(
        evaluate("math.sqrt(81)", CalculationMode::Basic),
        Ok(Number::Integer(9))
    );
}

#[rstest]
fn integer_overflow_widens_instead_of_failing() {
    let value = evaluate("9223372036854775807 + 1", CalculationMode::Basic).expect("evaluates");
    assert!(matches!(value, Number::Float(v) if v > 9.2e18));
}
