use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizAttemptRepository, MongoQuizRepository, MongoTrustedUserRepository,
        TrustedUserRepository,
    },
    services::results_service::ResultsService,
};

#[derive(Clone)]
pub struct AppState {
    pub results_service: Arc<ResultsService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Startup routine: connect, build repositories, ensure indexes. Index
    /// creation failure is logged and does not stop the server.
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let trusted_users = Arc::new(MongoTrustedUserRepository::new(
            &db,
            &config.trusted_users_collection,
        ));
        if let Err(err) = trusted_users.ensure_indexes().await {
            log::warn!(
                "Could not ensure trusted user indexes in '{}': {}",
                db.db_name(),
                err
            );
        }

        let quizzes = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        let attempts = Arc::new(MongoQuizAttemptRepository::new(
            &db,
            &config.attempts_collection,
        ));

        let results_service = Arc::new(ResultsService::new(
            quizzes,
            attempts,
            trusted_users,
            config.request_timeout(),
        ));

        Ok(Self::from_service(results_service, config))
    }

    pub fn from_service(results_service: Arc<ResultsService>, config: Config) -> Self {
        Self {
            results_service,
            config: Arc::new(config),
        }
    }
}
