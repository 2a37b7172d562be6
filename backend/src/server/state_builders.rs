//! Builders wiring repository adapters into HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use calculator_backend::domain::ports::{CalculationRepository, UserRepository};
use calculator_backend::domain::{
    AccountService, CalculationHistoryService, ExpressionCalculator,
};
use calculator_backend::inbound::http::state::{HttpState, HttpStatePorts};
use calculator_backend::outbound::memory::InMemoryStore;
use calculator_backend::outbound::persistence::{
    DieselCalculationRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Assemble handler ports over a user and a calculation repository.
fn ports_over<U, C>(users: Arc<U>, calculations: Arc<C>) -> HttpStatePorts
where
    U: UserRepository + 'static,
    C: CalculationRepository + 'static,
{
    HttpStatePorts {
        calculator: Arc::new(ExpressionCalculator),
        login: Arc::new(AccountService::new(users.clone())),
        history: Arc::new(CalculationHistoryService::new(users, calculations)),
    }
}

/// Build HTTP state using the SQLite adapters when a pool is configured,
/// otherwise a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => ports_over(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCalculationRepository::new(pool.clone())),
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            ports_over(store.clone(), store)
        }
    };
    web::Data::new(HttpState::new(ports, config.static_dir.clone()))
}
