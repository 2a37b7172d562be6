//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod calculate;
pub mod calculations;
pub mod error;
pub mod health;
pub mod index;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;

use actix_web::web;
use chrono::{NaiveDateTime, Timelike};

use crate::domain::Error;

/// JSON extractor configuration rendering payload errors in the failure envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register every calculator endpoint on an Actix service config.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use calculator_backend::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index::index)
        .service(health::health)
        .service(health::ready)
        .service(health::live)
        .service(calculate::calculate)
        .service(auth::login)
        .service(calculations::save_calculation)
        .service(calculations::list_calculations)
        .service(calculations::clear_calculations)
        .service(calculations::delete_calculation);
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiResult<web::Json<()>> {
    Err(Error::not_found("Not found"))
}

/// Render a timestamp as ISO-8601 without offset, dropping a zero fraction.
pub(crate) fn iso_timestamp(value: NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(0, "2024-05-01T10:20:30")]
    #[case(123_456, "2024-05-01T10:20:30.123456")]
    #[case(5, "2024-05-01T10:20:30.000005")]
    fn timestamps_render_like_isoformat(#[case] micros: u32, #[case] expected: &str) {
        let value = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_micro_opt(10, 20, 30, micros))
            .expect("valid timestamp");
        assert_eq!(iso_timestamp(value), expected);
    }
}
