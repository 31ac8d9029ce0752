pub mod health_handler;
pub mod quiz_handler;
pub mod results_handler;
pub mod trusted_handler;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};

pub use health_handler::health_check;
pub use quiz_handler::suggest_quizzes;
pub use results_handler::{get_attempt_detail, search_by_quiz, search_by_student};
pub use trusted_handler::is_trusted;

fn bad_request(message: String) -> actix_web::Error {
    let body = ErrorResponse {
        error: message.clone(),
        code: 400,
    };
    InternalError::from_response(
        AppError::ValidationError(message),
        HttpResponse::BadRequest().json(body),
    )
    .into()
}

/// Registers every route plus extractor configs that turn malformed bodies and
/// query strings into the standard JSON error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| bad_request(err.to_string())),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
    .service(health_check)
    .service(suggest_quizzes)
    .service(is_trusted)
    .service(search_by_quiz)
    .service(search_by_student)
    .service(get_attempt_detail);
}
