//! HTTP inbound adapter exposing the chair REST endpoints.

use actix_web::web;

pub mod auth;
pub mod chair;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register the `/api/chair` scope with uniform extractor error handling.
///
/// The caller provides [`state::HttpState`] as app data.
pub fn configure_chair_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/chair")
            .app_data(error::json_config())
            .app_data(error::path_config())
            .service(chair::post_coordinate)
            .service(chair::post_ride_status)
            .service(chair::get_notification)
            .service(chair::post_activity),
    );
}
