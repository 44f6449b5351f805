pub mod health_handler;
pub mod quiz_handler;

pub use health_handler::{health_check, health_check_ready, service_info};
pub use quiz_handler::{generate_quiz, get_quiz, list_quizzes};

use actix_web::{web, HttpRequest};

use crate::errors::AppError;

/// Registers every route on an app or scope. Extractor failures answer with
/// the same JSON error body as the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        actix_web::Error::from(AppError::ValidationError(format!(
            "Invalid request body: {}",
            err
        )))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        actix_web::Error::from(AppError::ValidationError(format!(
            "Invalid query string: {}",
            err
        )))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        actix_web::Error::from(AppError::ValidationError(format!("Invalid path: {}", err)))
    }))
    .service(service_info)
    .service(health_check)
    .service(health_check_ready)
    .service(generate_quiz)
    .service(list_quizzes)
    .service(get_quiz);
}
