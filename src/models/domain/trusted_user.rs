use serde::Deserialize;

use crate::models::domain::lenient;

/// An account allowed to search quiz results without the quiz password.
/// Legacy records may lack `emailLower`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrustedUser {
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email_lower: Option<String>,
}
