//! Expression pipeline: normalise raw text, evaluate it against a fixed
//! allow-list, and canonicalise the numeric result.
//!
//! ```text
//! raw text --normalize--> canonical text --parse/evaluate--> Number --format--> Number
//! ```
//!
//! Evaluation never reaches a general-purpose interpreter. The parser only
//! understands numbers, `+ - * / **`, parentheses, and calls to the names in
//! [`Function`](functions::Function); everything else is rejected.
//!
//! Constant substitution and scientific rewriting are plain text transforms.
//! Identifiers that contain `pi` or `e`, and function arguments with nested
//! parentheses, are rewritten exactly as the transforms dictate even when the
//! outcome is surprising.

mod error;
mod formatter;
mod functions;
mod lexer;
mod normalizer;
mod number;
mod parser;

pub use self::error::{EvaluationError, EvaluationFailure};
pub use self::normalizer::normalize;
pub use self::number::Number;

/// Rewriting mode applied before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationMode {
    /// Constants and `^` only.
    #[default]
    Basic,
    /// Additionally rewrite degree trigonometry, logarithms, and square roots.
    Scientific,
}

impl CalculationMode {
    /// Select the mode for a free-form calculation kind.
    ///
    /// Only the exact string `scientific` enables scientific rewriting.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::expression::CalculationMode;
    ///
    /// assert_eq!(CalculationMode::from_kind("scientific"), CalculationMode::Scientific);
    /// assert_eq!(CalculationMode::from_kind("Scientific"), CalculationMode::Basic);
    /// ```
    pub fn from_kind(kind: &str) -> Self {
        if kind == "scientific" {
            Self::Scientific
        } else {
            Self::Basic
        }
    }
}

/// Normalise, evaluate, and format an expression.
///
/// # Examples
/// ```
/// use calculator_backend::domain::expression::{evaluate, CalculationMode, Number};
///
/// assert_eq!(evaluate("2+2", CalculationMode::Basic), Ok(Number::Integer(4)));
/// assert_eq!(evaluate("sin(90)", CalculationMode::Scientific), Ok(Number::Integer(1)));
/// ```
pub fn evaluate(raw: &str, mode: CalculationMode) -> Result<Number, EvaluationError> {
    let normalized = normalize(raw, mode);
    let value = parser::parse(&normalized)?.evaluate()?;
    if !value.is_finite() {
        return Err(EvaluationError::Overflow);
    }
    Ok(formatter::format_result(value))
}

#[cfg(test)]
mod tests;
