use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    models::dto::{request::TrustedEmailRequest, response::TrustedResponse},
};

/// Always answers 200. An unreadable body is treated like a missing email.
#[post("/api/auth/isTrusted")]
async fn is_trusted(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let request: TrustedEmailRequest = serde_json::from_slice(&body).unwrap_or_default();
    let is_trusted = state.results_service.is_trusted_email(request.email()).await;
    HttpResponse::Ok().json(TrustedResponse { is_trusted })
}
