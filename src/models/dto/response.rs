use serde::Serialize;

use crate::models::domain::{lenient, NormalizedId, Quiz, QuizAttempt};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSuggestion {
    pub quiz_id: NormalizedId,
    pub quiz_name: Option<String>,
    pub quiz_code: Option<String>,
}

impl From<Quiz> for QuizSuggestion {
    fn from(quiz: Quiz) -> Self {
        QuizSuggestion {
            quiz_id: quiz.quiz_id,
            quiz_name: quiz.quiz_name,
            quiz_code: quiz.quiz_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub quizzes: Vec<QuizSuggestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedResponse {
    pub is_trusted: bool,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// One line of a results listing. Student identity is only filled in for the
/// instructor view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    #[serde(rename = "_id")]
    pub id: serde_json::Value,
    pub attempt_id: NormalizedId,
    pub quiz_id: NormalizedId,
    pub quiz_name: Option<String>,
    pub quiz_code: Option<String>,
    pub subject: Option<String>,
    pub num_displayed_questions: Option<f64>,
    pub instructor_name: Option<String>,
    pub course: Option<String>,
    pub start_time: serde_json::Value,
    pub end_time: serde_json::Value,
    pub duration_minutes: Option<i64>,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub student: Option<StudentIdentity>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub enrollment_number: Option<String>,
}

impl ResultRow {
    pub fn new(attempt: &QuizAttempt, quiz: Option<&Quiz>, with_student: bool) -> Self {
        ResultRow {
            id: lenient::opt_to_json(attempt.document_id.as_ref()),
            attempt_id: attempt.attempt_id.clone(),
            quiz_id: attempt.quiz_id.clone(),
            quiz_name: quiz.and_then(|q| q.quiz_name.clone()),
            quiz_code: quiz.and_then(|q| q.quiz_code.clone()),
            subject: quiz.and_then(|q| q.subject.clone()),
            num_displayed_questions: quiz.and_then(|q| q.num_displayed_questions),
            instructor_name: quiz.and_then(|q| q.instructor_name.clone()),
            course: quiz.and_then(|q| q.course.clone()),
            start_time: lenient::opt_to_json(attempt.start_time.as_ref()),
            end_time: lenient::opt_to_json(attempt.end_time.as_ref()),
            duration_minutes: attempt.duration_minutes(),
            marks_obtained: attempt.marks_obtained,
            total_marks: attempt.total_marks,
            status: attempt.status.clone(),
            student: with_student.then(|| StudentIdentity {
                student_name: attempt.student_name.clone(),
                student_email: attempt.student_email.clone(),
                enrollment_number: attempt.enrollment_number.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};

    fn attempt() -> QuizAttempt {
        from_document(doc! {
            "attemptId": 55,
            "quizId": 1,
            "studentName": "Asha",
            "startTime": "2024-03-01T10:00:00Z",
            "endTime": "2024-03-01T10:30:00Z",
            "marksObtained": 7,
            "totalMarks": 9,
        })
        .unwrap()
    }

    #[test]
    fn instructor_rows_carry_student_identity() {
        let quiz: Quiz = from_document(doc! { "quizId": 1, "quizName": "Midterm" }).unwrap();
        let row = serde_json::to_value(ResultRow::new(&attempt(), Some(&quiz), true)).unwrap();

        assert_eq!(row["quizName"], "Midterm");
        assert_eq!(row["studentName"], "Asha");
        assert_eq!(row["studentEmail"], serde_json::Value::Null);
        assert_eq!(row["durationMinutes"], 30);
        assert_eq!(row["attemptId"], 55);
    }

    #[test]
    fn student_rows_omit_identity_fields() {
        let row = serde_json::to_value(ResultRow::new(&attempt(), None, false)).unwrap();
        let object = row.as_object().unwrap();

        assert!(!object.contains_key("studentName"));
        assert!(!object.contains_key("enrollmentNumber"));
        assert_eq!(row["quizName"], serde_json::Value::Null);
        assert_eq!(row["_id"], serde_json::Value::Null);
    }
}
