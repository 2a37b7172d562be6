//! Evaluation failures and their client-facing categories.

/// Broad failure category used to build client messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationFailure {
    DivisionByZero,
    Math,
    InvalidExpression,
}

/// Errors raised while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// The text does not match the arithmetic grammar.
    #[error("invalid syntax: {message}")]
    Syntax { message: String },
    /// A name outside the allow-list was referenced.
    #[error("name '{name}' is not defined")]
    UndefinedName { name: String },
    /// An allow-listed function received the wrong number or kind of arguments.
    #[error("{message}")]
    InvalidArguments { message: String },
    #[error("division by zero")]
    DivisionByZero,
    /// Square root of a negative number, logarithm of a non-positive number,
    /// or similar.
    #[error("math domain error")]
    Domain,
    #[error("numerical result out of range")]
    Overflow,
    #[error("complex results are not supported")]
    ComplexResult,
}

impl EvaluationError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    pub(crate) fn undefined_name(name: impl Into<String>) -> Self {
        Self::UndefinedName { name: name.into() }
    }

    pub(crate) fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Category reported to clients.
    pub fn failure(&self) -> EvaluationFailure {
        match self {
            Self::DivisionByZero => EvaluationFailure::DivisionByZero,
            Self::Domain => EvaluationFailure::Math,
            Self::Syntax { .. }
            | Self::UndefinedName { .. }
            | Self::InvalidArguments { .. }
            | Self::Overflow
            | Self::ComplexResult => EvaluationFailure::InvalidExpression,
        }
    }

    /// Message naming the failure category, suitable for API responses.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::expression::EvaluationError;
    ///
    /// assert_eq!(EvaluationError::DivisionByZero.client_message(), "Division by zero");
    /// assert_eq!(EvaluationError::Domain.client_message(), "Math error: math domain error");
    /// ```
    pub fn client_message(&self) -> String {
        match self.failure() {
            EvaluationFailure::DivisionByZero => "Division by zero".to_owned(),
            EvaluationFailure::Math => format!("Math error: {self}"),
            EvaluationFailure::InvalidExpression => format!("Invalid expression: {self}"),
        }
    }
}
