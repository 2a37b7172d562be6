//! Numeric values and arithmetic.
//!
//! Integers stay integral under `+ - *` and non-negative integer powers, and
//! widen to floats when an operation would overflow `i64`. Division always
//! produces a float.
//!
//! There is no arbitrary-precision integer: `2^64` evaluates to the float
//! `1.8446744073709552e19` rather than the exact `18446744073709551616`, and
//! integer literals beyond `i64` are read as the nearest float.

use std::cmp::Ordering;

use serde::Serialize;

use super::EvaluationError;

/// Exclusive upper bound of the `i64` range as a float (2^63).
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Evaluated numeric value.
///
/// Serialises as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Value as a float.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 lose precision like any float conversion"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    /// Whether the value is a finite number.
    pub fn is_finite(self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(value) => value.is_finite(),
        }
    }

    /// Convert an integral float to an integer when it fits `i64`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range and integrality are checked before the cast"
    )]
    pub(super) fn integral_float_to_integer(value: f64) -> Option<i64> {
        let integral = value.is_finite() && value.fract() == 0.0;
        (integral && (-I64_UPPER..I64_UPPER).contains(&value)).then_some(value as i64)
    }

    pub(super) fn negate(self) -> Self {
        match self {
            Self::Integer(value) => value
                .checked_neg()
                .map_or_else(|| Self::Float(-self.as_f64()), Self::Integer),
            Self::Float(value) => Self::Float(-value),
        }
    }

    pub(super) fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a
                .checked_add(b)
                .map_or_else(|| Self::Float(self.as_f64() + rhs.as_f64()), Self::Integer),
            _ => Self::Float(self.as_f64() + rhs.as_f64()),
        }
    }

    pub(super) fn subtract(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a
                .checked_sub(b)
                .map_or_else(|| Self::Float(self.as_f64() - rhs.as_f64()), Self::Integer),
            _ => Self::Float(self.as_f64() - rhs.as_f64()),
        }
    }

    pub(super) fn multiply(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a
                .checked_mul(b)
                .map_or_else(|| Self::Float(self.as_f64() * rhs.as_f64()), Self::Integer),
            _ => Self::Float(self.as_f64() * rhs.as_f64()),
        }
    }

    pub(super) fn divide(self, rhs: Self) -> Result<Self, EvaluationError> {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            return Err(EvaluationError::DivisionByZero);
        }
        Ok(Self::Float(self.as_f64() / divisor))
    }

    pub(super) fn power(self, exponent: Self) -> Result<Self, EvaluationError> {
        if let (Self::Integer(base), Self::Integer(exp)) = (self, exponent) {
            if let Ok(exp) = u32::try_from(exp) {
                if let Some(value) = base.checked_pow(exp) {
                    return Ok(Self::Integer(value));
                }
            }
        }
        float_power(self.as_f64(), exponent.as_f64()).map(Self::Float)
    }

    /// Numeric ordering across integer and float values.
    pub(super) fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(&b),
            _ => self
                .as_f64()
                .partial_cmp(&other.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

fn float_power(base: f64, exponent: f64) -> Result<f64, EvaluationError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(EvaluationError::ComplexResult);
    }
    let value = base.powf(exponent);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::Overflow)
    }
}

/// Round to `digits` decimal places, ties to even. Negative `digits` round to
/// tens, hundreds, and so on.
///
/// Non-negative `digits` round the exact binary value through decimal
/// formatting, so `2.675` (stored just below the tie) rounds to `2.67`.
pub(super) fn round_to_digits(value: f64, digits: i64) -> f64 {
    // Beyond these bounds rounding cannot change an f64 (or zeroes it).
    if digits > 308 {
        return value;
    }
    if digits < -308 {
        return 0.0_f64.copysign(value);
    }
    if digits >= 0 {
        if !value.is_finite() || value.fract() == 0.0 {
            return value;
        }
        let Ok(precision) = usize::try_from(digits) else {
            return value;
        };
        return format!("{value:.precision$}").parse().unwrap_or(value);
    }
    let Ok(digits) = i32::try_from(digits) else {
        return value;
    };
    let factor = 10_f64.powi(-digits);
    (value / factor).round_ties_even() * factor
}
