//! Test helpers for inbound HTTP components.

use std::path::Path;
use std::sync::Arc;

use actix_web::web;

use crate::domain::{AccountService, CalculationHistoryService, ExpressionCalculator};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Build handler state over a fresh in-memory store.
///
/// - Uses the real domain services so handlers see production behaviour.
/// - Points the static directory at `static_dir`.
pub fn memory_state(static_dir: impl AsRef<Path>) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new());
    let ports = HttpStatePorts {
        calculator: Arc::new(ExpressionCalculator),
        login: Arc::new(AccountService::new(store.clone())),
        history: Arc::new(CalculationHistoryService::new(store.clone(), store)),
    };
    web::Data::new(HttpState::new(ports, static_dir.as_ref()))
}
