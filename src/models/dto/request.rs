use serde::{Deserialize, Deserializer};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuggestQuery {
    pub query: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrustedEmailRequest {
    pub email: Option<serde_json::Value>,
}

impl TrustedEmailRequest {
    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(|value| value.as_str())
    }
}

/// Instructor search. Either `quizId` or `quizName` identifies the quiz; the
/// password is only consulted when `email` is not trusted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchByQuizRequest {
    pub quiz_id: Option<serde_json::Value>,
    pub quiz_name: Option<serde_json::Value>,
    pub password: Option<serde_json::Value>,
    pub email: Option<serde_json::Value>,
}

impl SearchByQuizRequest {
    pub fn quiz_name(&self) -> Option<&str> {
        self.quiz_name
            .as_ref()
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(|value| value.as_str())
    }

    /// The supplied password, if it is a non-empty string.
    pub fn password(&self) -> Option<&str> {
        self.password
            .as_ref()
            .and_then(|value| value.as_str())
            .filter(|password| !password.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchByStudentRequest {
    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "enrollmentNumber is required"))]
    pub enrollment_number: String,

    #[serde(deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}

impl SearchByStudentRequest {
    pub fn trimmed(self) -> Self {
        Self {
            enrollment_number: self.enrollment_number.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// Enrollment numbers are sometimes sent as JSON numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
