pub mod lenient;
pub mod numeric_id;
pub mod quiz;
pub mod quiz_attempt;
pub mod trusted_user;

pub use numeric_id::NormalizedId;
pub use quiz::{Question, QuestionOption, Quiz};
pub use quiz_attempt::{AttemptAnswer, QuizAttempt};
pub use trusted_user::TrustedUser;
