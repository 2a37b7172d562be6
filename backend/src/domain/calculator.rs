//! Expression evaluation use-case.

use tracing::debug;

use crate::domain::expression::{self, CalculationMode};
use crate::domain::ports::{CalculateRequest, CalculateResponse, Calculator};
use crate::domain::{DEFAULT_KIND, Error};

/// Stateless calculator backed by the expression pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionCalculator;

impl Calculator for ExpressionCalculator {
    fn calculate(&self, request: &CalculateRequest) -> Result<CalculateResponse, Error> {
        if request.expression.is_empty() {
            return Err(Error::invalid_request("No expression provided"));
        }
        let calculation_type = request
            .calculation_type
            .clone()
            .unwrap_or_else(|| DEFAULT_KIND.to_owned());
        let mode = CalculationMode::from_kind(&calculation_type);

        let result = expression::evaluate(&request.expression, mode).map_err(|err| {
            debug!(error = %err, ?mode, "expression evaluation failed");
            Error::invalid_request(err.client_message())
        })?;

        Ok(CalculateResponse {
            result,
            expression: request.expression.clone(),
            calculation_type,
        })
    }
}
