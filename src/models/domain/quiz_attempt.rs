use mongodb::bson::Bson;
use serde::Deserialize;

use crate::models::domain::{lenient, NormalizedId};

/// One student's submission against a quiz, in whichever historical shape it
/// was recorded.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizAttempt {
    #[serde(rename = "_id")]
    pub document_id: Option<Bson>,
    pub attempt_id: NormalizedId,
    pub quiz_id: NormalizedId,
    #[serde(deserialize_with = "lenient::string")]
    pub student_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub student_email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub enrollment_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub section: Option<String>,
    pub start_time: Option<Bson>,
    pub end_time: Option<Bson>,
    #[serde(deserialize_with = "lenient::number")]
    pub marks_obtained: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_marks: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub system_name: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub full_screen_faults: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub easy_questions_correct: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub medium_questions_correct: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub high_questions_correct: Option<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub answers: Vec<AttemptAnswer>,
    /// Array of `{questionId, displayOrder|originalOrder}`, array of raw ids,
    /// or either of those JSON-encoded as a string.
    pub displayed_questions: Option<Bson>,
    /// Flat array of question ids already in display order.
    pub display_order: Option<Bson>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttemptAnswer {
    pub question_id: NormalizedId,
    #[serde(deserialize_with = "lenient::id_list")]
    pub selected_option_ids: Vec<NormalizedId>,
}

impl QuizAttempt {
    /// Timestamp used to pick the latest attempt: `endTime` when set, else
    /// `startTime`. A set but unreadable `endTime` yields `None`.
    pub fn recency_millis(&self) -> Option<i64> {
        let recorded = self
            .end_time
            .as_ref()
            .filter(|end| lenient::is_set(end))
            .or(self.start_time.as_ref())?;
        lenient::timestamp_millis(recorded)
    }

    /// Whole minutes between start and end, `None` if either is unreadable.
    pub fn duration_minutes(&self) -> Option<i64> {
        let start = lenient::timestamp_millis(self.start_time.as_ref()?)?;
        let end = lenient::timestamp_millis(self.end_time.as_ref()?)?;
        let elapsed = end.checked_sub(start)?;
        Some(lenient::round_half_up(elapsed as f64 / 60_000.0) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    #[test]
    fn attempt_decodes_answers_and_order_fields() {
        let attempt: QuizAttempt = from_document(doc! {
            "attemptId": 55_i64,
            "quizId": "1",
            "enrollmentNumber": 2023001,
            "answers": [
                { "questionId": 10, "selectedOptionIds": [100, "101"] },
                { "questionId": 11 },
            ],
            "displayedQuestions": "[11, 10]",
        })
        .expect("attempt should decode");

        assert_eq!(attempt.attempt_id, NormalizedId::Int(55));
        assert_eq!(attempt.quiz_id, NormalizedId::Int(1));
        assert_eq!(attempt.enrollment_number.as_deref(), Some("2023001"));
        assert_eq!(attempt.answers.len(), 2);
        assert_eq!(
            attempt.answers[0].selected_option_ids,
            vec![NormalizedId::Int(100), NormalizedId::Int(101)]
        );
        assert!(attempt.answers[1].selected_option_ids.is_empty());
        assert!(matches!(attempt.displayed_questions, Some(Bson::String(_))));
        assert!(attempt.display_order.is_none());
    }

    #[test]
    fn duration_rounds_to_whole_minutes() {
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "2024-03-01T10:44:31Z",
        })
        .unwrap();
        assert_eq!(attempt.duration_minutes(), Some(45));

        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "whenever",
        })
        .unwrap();
        assert_eq!(attempt.duration_minutes(), None);
    }

    #[test]
    fn recency_falls_back_to_start_time() {
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:00:00Z",
        })
        .unwrap();
        assert_eq!(attempt.recency_millis(), Some(1_709_287_200_000));

        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "",
        })
        .unwrap();
        assert_eq!(attempt.recency_millis(), Some(1_709_287_200_000));
    }

    #[test]
    fn unreadable_end_time_does_not_fall_back() {
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "whenever",
        })
        .unwrap();
        assert_eq!(attempt.recency_millis(), None);
    }

    #[test]
    fn extreme_timestamps_give_no_duration() {
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": i64::MIN,
            "endTime": 1_i64,
        })
        .unwrap();
        assert_eq!(attempt.duration_minutes(), None);

        let latest = lenient::MAX_TIMESTAMP_MILLIS;
        let earliest = -latest;
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": earliest,
            "endTime": latest,
        })
        .unwrap();
        assert_eq!(attempt.duration_minutes(), Some(288_000_000_000));
    }

    #[test]
    fn negative_half_minute_durations_round_up() {
        let attempt: QuizAttempt = from_document(doc! {
            "startTime": "2024-03-01T10:01:30Z",
            "endTime": "2024-03-01T10:00:00Z",
        })
        .unwrap();
        assert_eq!(attempt.duration_minutes(), Some(-1));
    }
}
