use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Quiz,
    repositories::filters::{any_of, contains_ignore_case, equals_ignore_case, id_variants},
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Option<Quiz>>;
    async fn find_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<Vec<Quiz>>;
    /// Case-insensitive exact name match; may return several quizzes.
    async fn find_by_name(&self, quiz_name: &str) -> AppResult<Vec<Quiz>>;
    /// Case-insensitive substring match projected to id, name and code.
    async fn suggest_by_name(&self, fragment: &str, limit: i64) -> AppResult<Vec<Quiz>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_quiz_id(&self, quiz_id: i64) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "quizId": any_of(id_variants(quiz_id)) })
            .await?;
        Ok(quiz)
    }

    async fn find_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<Vec<Quiz>> {
        if quiz_ids.is_empty() {
            return Ok(Vec::new());
        }
        let variants = quiz_ids.iter().flat_map(|id| id_variants(*id)).collect();
        let quizzes = self
            .collection
            .find(doc! { "quizId": any_of(variants) })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn find_by_name(&self, quiz_name: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "quizName": equals_ignore_case(quiz_name) })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn suggest_by_name(&self, fragment: &str, limit: i64) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "quizName": contains_ignore_case(fragment) })
            .projection(doc! { "_id": 0, "quizId": 1, "quizName": 1, "quizCode": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }
}
