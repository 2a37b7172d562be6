//! Allow-listed functions callable from expressions.
//!
//! Built-ins are available unqualified. Scientific helpers live under the
//! reserved `math.` prefix and are only reachable through scientific
//! rewriting or by spelling the qualified name out.

use std::cmp::Ordering;
use std::f64::consts::PI;

use super::number::{Number, round_to_digits};
use super::EvaluationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Function {
    Abs,
    Round,
    Min,
    Max,
    Sin,
    Cos,
    Tan,
    Radians,
    Log10,
    Log,
    Sqrt,
}

impl Function {
    pub(super) fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "round" => Self::Round,
            "min" => Self::Min,
            "max" => Self::Max,
            "math.sin" => Self::Sin,
            "math.cos" => Self::Cos,
            "math.tan" => Self::Tan,
            "math.radians" => Self::Radians,
            "math.log10" => Self::Log10,
            "math.log" => Self::Log,
            "math.sqrt" => Self::Sqrt,
            _ => return None,
        })
    }

    pub(super) fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sin => "math.sin",
            Self::Cos => "math.cos",
            Self::Tan => "math.tan",
            Self::Radians => "math.radians",
            Self::Log10 => "math.log10",
            Self::Log => "math.log",
            Self::Sqrt => "math.sqrt",
        }
    }

    pub(super) fn apply(self, args: &[Number]) -> Result<Number, EvaluationError> {
        match self {
            Self::Abs => Ok(abs(self.single(args)?)),
            Self::Round => round(args),
            Self::Min => self.extreme(args, Ordering::Less),
            Self::Max => self.extreme(args, Ordering::Greater),
            Self::Sin => trigonometric(self.single(args)?, f64::sin),
            Self::Cos => trigonometric(self.single(args)?, f64::cos),
            Self::Tan => trigonometric(self.single(args)?, f64::tan),
            Self::Radians => Ok(Number::Float(
                self.single(args)?.as_f64() * (PI / 180.0),
            )),
            Self::Log10 => positive(self.single(args)?).map(|x| Number::Float(x.log10())),
            Self::Log => log(args),
            Self::Sqrt => {
                let value = self.single(args)?.as_f64();
                if value < 0.0 {
                    return Err(EvaluationError::Domain);
                }
                Ok(Number::Float(value.sqrt()))
            }
        }
    }

    fn single(self, args: &[Number]) -> Result<Number, EvaluationError> {
        match args {
            [value] => Ok(*value),
            _ => Err(EvaluationError::invalid_arguments(format!(
                "{}() takes exactly one argument ({} given)",
                self.name(),
                args.len()
            ))),
        }
    }

    /// First argument that is strictly smaller (or larger) than every
    /// argument before it.
    fn extreme(self, args: &[Number], wanted: Ordering) -> Result<Number, EvaluationError> {
        let [first, rest @ ..] = args else {
            return Err(self.too_few_for_extreme(args));
        };
        if rest.is_empty() {
            return Err(self.too_few_for_extreme(args));
        }
        Ok(rest.iter().fold(*first, |best, candidate| {
            if candidate.compare(best) == wanted {
                *candidate
            } else {
                best
            }
        }))
    }

    fn too_few_for_extreme(self, args: &[Number]) -> EvaluationError {
        EvaluationError::invalid_arguments(format!(
            "{}() expected at least 2 arguments, got {}",
            self.name(),
            args.len()
        ))
    }
}

fn abs(value: Number) -> Number {
    match value {
        Number::Integer(int) => int
            .checked_abs()
            .map_or_else(|| Number::Float(value.as_f64().abs()), Number::Integer),
        Number::Float(float) => Number::Float(float.abs()),
    }
}

fn round(args: &[Number]) -> Result<Number, EvaluationError> {
    match args {
        [value] => Ok(round_to_integer(*value)),
        [value, Number::Integer(digits)] => Ok(match value {
            Number::Integer(_) if *digits >= 0 => *value,
            _ => {
                let rounded = round_to_digits(value.as_f64(), *digits);
                match value {
                    Number::Integer(_) => Number::integral_float_to_integer(rounded)
                        .map_or(Number::Float(rounded), Number::Integer),
                    Number::Float(_) => Number::Float(rounded),
                }
            }
        }),
        [_, Number::Float(_)] => Err(EvaluationError::invalid_arguments(
            "round() digits must be an integer",
        )),
        _ => Err(EvaluationError::invalid_arguments(format!(
            "round() takes 1 or 2 arguments ({} given)",
            args.len()
        ))),
    }
}

fn round_to_integer(value: Number) -> Number {
    match value {
        Number::Integer(_) => value,
        Number::Float(float) => {
            let rounded = float.round_ties_even();
            Number::integral_float_to_integer(rounded)
                .map_or(Number::Float(rounded), Number::Integer)
        }
    }
}

fn trigonometric(value: Number, op: fn(f64) -> f64) -> Result<Number, EvaluationError> {
    let angle = value.as_f64();
    if !angle.is_finite() {
        return Err(EvaluationError::Domain);
    }
    Ok(Number::Float(op(angle)))
}

fn positive(value: Number) -> Result<f64, EvaluationError> {
    let value = value.as_f64();
    if value > 0.0 {
        Ok(value)
    } else {
        Err(EvaluationError::Domain)
    }
}

fn log(args: &[Number]) -> Result<Number, EvaluationError> {
    match args {
        [value] => positive(*value).map(|x| Number::Float(x.ln())),
        [value, base] => {
            let numerator = positive(*value)?.ln();
            let denominator = positive(*base)?.ln();
            if denominator == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            Ok(Number::Float(numerator / denominator))
        }
        _ => Err(EvaluationError::invalid_arguments(format!(
            "math.log() takes 1 or 2 arguments ({} given)",
            args.len()
        ))),
    }
}
