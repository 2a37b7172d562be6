//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::ports::{CalculationHistory, Calculator, LoginService};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub calculator: Arc<dyn Calculator>,
    pub login: Arc<dyn LoginService>,
    pub history: Arc<dyn CalculationHistory>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub calculator: Arc<dyn Calculator>,
    pub login: Arc<dyn LoginService>,
    pub history: Arc<dyn CalculationHistory>,
    /// Directory holding the calculator front-end.
    pub static_dir: PathBuf,
}

impl HttpState {
    /// Construct state from a ports bundle and the static asset directory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use calculator_backend::domain::{AccountService, CalculationHistoryService, ExpressionCalculator};
    /// use calculator_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use calculator_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let ports = HttpStatePorts {
    ///     calculator: Arc::new(ExpressionCalculator),
    ///     login: Arc::new(AccountService::new(store.clone())),
    ///     history: Arc::new(CalculationHistoryService::new(store.clone(), store)),
    /// };
    /// let state = HttpState::new(ports, "static");
    /// assert_eq!(state.static_dir.to_str(), Some("static"));
    /// ```
    pub fn new(ports: HttpStatePorts, static_dir: impl Into<PathBuf>) -> Self {
        let HttpStatePorts {
            calculator,
            login,
            history,
        } = ports;
        Self {
            calculator,
            login,
            history,
            static_dir: static_dir.into(),
        }
    }
}
