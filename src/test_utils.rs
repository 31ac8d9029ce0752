#[cfg(test)]
pub mod fixtures {
    use mongodb::bson::{doc, from_document, Document};

    use crate::models::domain::{Quiz, QuizAttempt};

    pub fn quiz_from(document: Document) -> Quiz {
        from_document(document).expect("quiz fixture should decode")
    }

    pub fn attempt_from(document: Document) -> QuizAttempt {
        from_document(document).expect("attempt fixture should decode")
    }

    /// Two questions: q1 has a two-option answer key, q2 is worth 2 points.
    pub fn sample_quiz_document() -> Document {
        doc! {
            "quizId": 1,
            "quizName": "Midterm",
            "subject": "Mathematics",
            "password": "AbC123",
            "questions": [
                {
                    "id": 1,
                    "questionText": "Pick the even numbers",
                    "subject": "Algebra",
                    "options": [
                        { "id": 10, "optionText": "2", "correct": true },
                        { "id": 11, "optionText": "4", "correct": true },
                        { "id": 12, "optionText": "5", "correct": false },
                    ],
                },
                {
                    "id": 2,
                    "questionText": "3 * 3",
                    "points": 2,
                    "options": [
                        { "id": 20, "optionText": "9", "correct": true },
                        { "id": 21, "optionText": "6", "correct": false },
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_sample_quiz_fixture() {
        let quiz = quiz_from(sample_quiz_document());
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_option_ids().len(), 2);
    }
}
