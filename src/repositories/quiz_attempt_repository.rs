use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::QuizAttempt,
    repositories::filters::{any_of, attempt_id_variants, equals_ignore_case, id_variants},
};

#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// `raw_id` is the id exactly as the caller sent it.
    async fn find_by_attempt_id(&self, attempt_id: i64, raw_id: &str)
        -> AppResult<Option<QuizAttempt>>;
    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Vec<QuizAttempt>>;
    /// Exact enrollment number, case-insensitive exact email.
    async fn find_by_student(
        &self,
        enrollment_number: &str,
        email: &str,
    ) -> AppResult<Vec<QuizAttempt>>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn find_by_attempt_id(
        &self,
        attempt_id: i64,
        raw_id: &str,
    ) -> AppResult<Option<QuizAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! { "attemptId": any_of(attempt_id_variants(attempt_id, raw_id)) })
            .await?;
        Ok(attempt)
    }

    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "quizId": any_of(id_variants(quiz_id)) })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn find_by_student(
        &self,
        enrollment_number: &str,
        email: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! {
                "enrollmentNumber": enrollment_number,
                "studentEmail": equals_ignore_case(email),
            })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }
}
