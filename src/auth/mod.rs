pub mod quiz_access;

pub use quiz_access::{normalize_quiz_password, require_quiz_access};
