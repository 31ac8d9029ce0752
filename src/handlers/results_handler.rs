use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{SearchByQuizRequest, SearchByStudentRequest},
        response::ResultsResponse,
    },
};

#[post("/api/results/searchByQuiz")]
async fn search_by_quiz(
    state: web::Data<AppState>,
    request: web::Json<SearchByQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let results = state
        .results_service
        .search_by_quiz(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ResultsResponse { results }))
}

#[post("/api/results/search")]
async fn search_by_student(
    state: web::Data<AppState>,
    request: web::Json<SearchByStudentRequest>,
) -> Result<HttpResponse, AppError> {
    let results = state
        .results_service
        .search_by_student(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ResultsResponse { results }))
}

#[get("/api/results/{attempt_id}")]
async fn get_attempt_detail(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let detail = state
        .results_service
        .get_attempt_detail(&attempt_id)
        .await?;
    Ok(HttpResponse::Ok().json(detail))
}
