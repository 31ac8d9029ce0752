pub mod filters;
pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod trusted_user_repository;

pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use trusted_user_repository::{MongoTrustedUserRepository, TrustedUserRepository};
