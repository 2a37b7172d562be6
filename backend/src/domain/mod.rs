//! Domain primitives, use-cases, and ports.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! layers, the expression pipeline, and the services behind the driving
//! ports. Nothing in this module depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User / Username / UserId: calculator users, created on first login.
//! - Calculation / NewCalculation: persisted history records.
//! - expression: normalise, evaluate, and format arithmetic input.
//! - AccountService / CalculationHistoryService / ExpressionCalculator:
//!   implementations of the driving ports in [`ports`].

pub mod accounts;
pub mod calculation;
pub mod calculation_history;
pub mod calculator;
pub mod error;
pub mod expression;
pub mod ports;
pub mod user;

pub use self::accounts::AccountService;
pub use self::calculation::{
    CUSTOM_NAME_MAX, Calculation, CalculationId, CalculationKind, CalculationValidationError,
    DEFAULT_KIND, EXPRESSION_MAX, KIND_MAX, NewCalculation, RESULT_MAX, SaveCalculationRequest,
};
pub use self::calculation_history::CalculationHistoryService;
pub use self::calculator::ExpressionCalculator;
pub use self::error::{Error, ErrorCode};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
