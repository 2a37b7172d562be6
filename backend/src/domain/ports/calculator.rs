//! Driving port for expression evaluation.

use crate::domain::Error;
use crate::domain::expression::Number;

/// Evaluation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculateRequest {
    /// Expression exactly as submitted.
    pub expression: String,
    /// Free-form kind; `scientific` enables scientific rewriting. Defaults to
    /// `basic` when absent.
    pub calculation_type: Option<String>,
}

/// Successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateResponse {
    pub result: Number,
    /// Expression exactly as submitted, before normalisation.
    pub expression: String,
    pub calculation_type: String,
}

/// Domain use-case port for evaluating expressions.
#[cfg_attr(test, mockall::automock)]
pub trait Calculator: Send + Sync {
    /// Evaluate an expression.
    ///
    /// Empty input and evaluation failures surface as
    /// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
    /// carrying the client message.
    fn calculate(&self, request: &CalculateRequest) -> Result<CalculateResponse, Error>;
}
