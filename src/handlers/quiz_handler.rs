use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::SuggestQuery, response::SuggestResponse},
};

#[get("/api/quizzes/suggest")]
async fn suggest_quizzes(
    state: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.results_service.suggest_quizzes(&query.query).await?;
    Ok(HttpResponse::Ok().json(SuggestResponse { quizzes }))
}
