//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`Calculator`], [`LoginService`], [`CalculationHistory`])
//! are called by inbound adapters. Driven ports ([`UserRepository`],
//! [`CalculationRepository`]) are implemented by outbound adapters and expose
//! strongly typed errors so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_history;
mod calculation_repository;
mod calculator;
mod login_service;
mod user_repository;

#[cfg(test)]
pub use calculation_history::MockCalculationHistory;
pub use calculation_history::CalculationHistory;
#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationPersistenceError, CalculationRepository};
#[cfg(test)]
pub use calculator::MockCalculator;
pub use calculator::{CalculateRequest, CalculateResponse, Calculator};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
