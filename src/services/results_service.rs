use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use validator::Validate;

use crate::{
    auth::require_quiz_access,
    errors::{AppError, AppResult},
    models::{
        domain::{NormalizedId, Quiz},
        dto::{
            attempt_detail::AttemptDetailDto,
            request::{SearchByQuizRequest, SearchByStudentRequest},
            response::{QuizSuggestion, ResultRow},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository, TrustedUserRepository},
    services::{
        attempt_detail_builder::build_attempt_detail,
        attempt_selection::{latest_per_enrollment, latest_per_quiz},
    },
};

pub const SUGGEST_MIN_QUERY_LEN: usize = 2;
pub const SUGGEST_LIMIT: i64 = 10;

/// Read-only access to quiz results. Every storage call is bounded by
/// `timeout`.
pub struct ResultsService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    trusted_users: Arc<dyn TrustedUserRepository>,
    timeout: Duration,
}

impl ResultsService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        trusted_users: Arc<dyn TrustedUserRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            trusted_users,
            timeout,
        }
    }

    async fn bounded<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        tokio::time::timeout(self.timeout, call).await?
    }

    pub async fn suggest_quizzes(&self, query: &str) -> AppResult<Vec<QuizSuggestion>> {
        let query = query.trim();
        if query.chars().count() < SUGGEST_MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let quizzes = self
            .bounded(self.quizzes.suggest_by_name(query, SUGGEST_LIMIT))
            .await?;
        Ok(quizzes.into_iter().map(QuizSuggestion::from).collect())
    }

    /// Never fails: any lookup error counts as "not trusted".
    pub async fn is_trusted_email(&self, email: Option<&str>) -> bool {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return false;
        };

        match self.lookup_trusted(email).await {
            Ok(trusted) => trusted,
            Err(err) => {
                log::warn!("trusted email check failed, treating as untrusted: {}", err);
                false
            }
        }
    }

    async fn lookup_trusted(&self, email: &str) -> AppResult<bool> {
        let email_lower = email.to_lowercase();
        if self
            .bounded(self.trusted_users.find_by_email_lower(&email_lower))
            .await?
            .is_some()
        {
            return Ok(true);
        }

        Ok(self
            .bounded(self.trusted_users.find_by_email_ignore_case(email))
            .await?
            .is_some())
    }

    async fn resolve_quiz(&self, request: &SearchByQuizRequest) -> AppResult<Quiz> {
        let quiz_id = request
            .quiz_id
            .as_ref()
            .filter(|value| !value.is_null() && value.as_str().map_or(true, |s| !s.trim().is_empty()));

        if let Some(raw_id) = quiz_id {
            let quiz_id = NormalizedId::from_json(raw_id)
                .as_i64()
                .ok_or_else(|| AppError::ValidationError("quizId must be numeric".to_string()))?;
            return self
                .bounded(self.quizzes.find_by_quiz_id(quiz_id))
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)));
        }

        let quiz_name = request.quiz_name().ok_or_else(|| {
            AppError::ValidationError("quizId or quizName is required".to_string())
        })?;

        let mut matches = self.bounded(self.quizzes.find_by_name(quiz_name)).await?;
        match matches.len() {
            0 => Err(AppError::NotFound(format!("Quiz '{}' not found", quiz_name))),
            1 => Ok(matches.remove(0)),
            n => Err(AppError::ValidationError(format!(
                "{} quizzes are named '{}'; search by quizId instead",
                n, quiz_name
            ))),
        }
    }

    /// Instructor view: latest attempt per enrollment number for one quiz.
    pub async fn search_by_quiz(&self, request: SearchByQuizRequest) -> AppResult<Vec<ResultRow>> {
        let quiz = self.resolve_quiz(&request).await?;

        let trusted = self.is_trusted_email(request.email()).await;
        require_quiz_access(trusted, request.password(), quiz.password.as_deref())?;

        let quiz_id = quiz
            .quiz_id
            .as_i64()
            .ok_or_else(|| AppError::NotFound("Quiz has no usable quizId".to_string()))?;

        let attempts = self.bounded(self.attempts.find_by_quiz_id(quiz_id)).await?;
        log::info!(
            "searchByQuiz: quiz {} has {} attempts (trusted: {})",
            quiz_id,
            attempts.len(),
            trusted
        );

        Ok(latest_per_enrollment(attempts)
            .iter()
            .map(|attempt| ResultRow::new(attempt, Some(&quiz), true))
            .collect())
    }

    /// Self-service view: latest attempt per quiz for one student.
    pub async fn search_by_student(
        &self,
        request: SearchByStudentRequest,
    ) -> AppResult<Vec<ResultRow>> {
        let request = request.trimmed();
        request.validate()?;

        let attempts = self
            .bounded(
                self.attempts
                    .find_by_student(&request.enrollment_number, &request.email),
            )
            .await?;
        let latest = latest_per_quiz(attempts);

        let quiz_ids: Vec<i64> = latest
            .iter()
            .filter_map(|attempt| attempt.quiz_id.as_i64())
            .collect();
        let quizzes: HashMap<i64, Quiz> = self
            .bounded(self.quizzes.find_by_quiz_ids(&quiz_ids))
            .await?
            .into_iter()
            .filter_map(|quiz| Some((quiz.quiz_id.as_i64()?, quiz)))
            .collect();

        Ok(latest
            .iter()
            .map(|attempt| {
                let quiz = attempt.quiz_id.as_i64().and_then(|id| quizzes.get(&id));
                ResultRow::new(attempt, quiz, false)
            })
            .collect())
    }

    pub async fn get_attempt_detail(&self, raw_attempt_id: &str) -> AppResult<AttemptDetailDto> {
        let attempt_id = parse_attempt_id(raw_attempt_id)?;

        let attempt = self
            .bounded(self.attempts.find_by_attempt_id(attempt_id, raw_attempt_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt {} not found", attempt_id)))?;

        let quiz_id = attempt.quiz_id.as_i64().ok_or_else(|| {
            AppError::NotFound(format!("Quiz for attempt {} not found", attempt_id))
        })?;
        let quiz = self
            .bounded(self.quizzes.find_by_quiz_id(quiz_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))?;

        Ok(build_attempt_detail(&attempt, &quiz))
    }
}

/// Path ids must be numeric; `" 55 "` and `"55.0"` are accepted.
pub fn parse_attempt_id(raw: &str) -> AppResult<i64> {
    NormalizedId::from_json(&serde_json::Value::String(raw.to_string()))
        .as_i64()
        .ok_or_else(|| AppError::ValidationError(format!("Invalid attempt id '{}'", raw)))
}
