//! Calculator backend: expression evaluation and per-user history over HTTP.
//!
//! Layout follows ports and adapters: `domain` holds the expression pipeline,
//! services and ports; `inbound::http` exposes them through Actix;
//! `outbound` implements the repository ports over SQLite or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
pub use settings::{CalculatorSettings, SettingsError, StorageBackend};
