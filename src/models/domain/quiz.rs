use serde::Deserialize;

use crate::models::domain::{lenient, NormalizedId};

/// A question bank plus its assessment metadata, as authored by the quiz UI.
/// Read-only from this service's point of view.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quiz {
    pub quiz_id: NormalizedId,
    #[serde(deserialize_with = "lenient::string")]
    pub quiz_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub quiz_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub subject_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub course: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub instructor_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub academic_year: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub course_year: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub num_displayed_questions: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub num_easy_questions: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub num_medium_questions: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub num_high_questions: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub password: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub show_detailed_result: Option<bool>,
    #[serde(deserialize_with = "lenient::list")]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Defaults to `true` unless the quiz explicitly stores a boolean.
    pub fn shows_detailed_result(&self) -> bool {
        self.show_detailed_result.unwrap_or(true)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Question {
    pub id: NormalizedId,
    #[serde(deserialize_with = "lenient::string")]
    pub question_text: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub points: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub difficulty: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub topic: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn points_or_default(&self) -> f64 {
        self.points.unwrap_or(1.0)
    }

    /// Normalized ids of the options flagged as correct: the answer key.
    pub fn correct_option_ids(&self) -> Vec<NormalizedId> {
        self.options
            .iter()
            .filter(|option| option.is_correct())
            .map(|option| option.id.clone())
            .collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: NormalizedId,
    #[serde(deserialize_with = "lenient::string")]
    pub option_text: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub correct: Option<bool>,
}

impl QuestionOption {
    pub fn is_correct(&self) -> bool {
        self.correct == Some(true)
    }
}
