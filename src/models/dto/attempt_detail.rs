use serde::Serialize;

use crate::models::domain::NormalizedId;

/// Client-facing reconstruction of one attempt. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptDetailDto {
    pub summary: AttemptSummary,
    pub questions: Vec<QuestionDetail>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub attempt_id: NormalizedId,
    pub quiz: QuizSummary,
    pub student: StudentSummary,
    pub timing: TimingSummary,
    pub scoring: ScoringSummary,
    pub meta: AttemptMeta,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub quiz_id: NormalizedId,
    pub quiz_name: Option<String>,
    pub quiz_code: Option<String>,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub course: Option<String>,
    pub instructor_name: Option<String>,
    pub academic_year: Option<String>,
    pub course_year: Option<String>,
    pub num_displayed_questions: Option<f64>,
    pub show_detailed_result: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub enrollment_number: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    pub start_time: serde_json::Value,
    pub end_time: serde_json::Value,
    pub duration_minutes: Option<i64>,
}

/// Difficulty counters are surfaced as stored; older attempts lack them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSummary {
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    pub percentage: Option<f64>,
    pub easy_questions_correct: Option<f64>,
    pub medium_questions_correct: Option<f64>,
    pub high_questions_correct: Option<f64>,
    pub num_easy_questions: Option<f64>,
    pub num_medium_questions: Option<f64>,
    pub num_high_questions: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptMeta {
    pub status: Option<String>,
    pub system_name: Option<String>,
    pub full_screen_faults: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    /// 1-based position in the resolved display order.
    pub index: usize,
    pub question_id: NormalizedId,
    pub question_text: Option<String>,
    pub image_url: Option<String>,
    pub points: f64,
    pub difficulty: Option<String>,
    pub topic: Option<String>,
    pub subject: Option<String>,
    pub options: Vec<OptionDetail>,
    pub selected_option_ids: Vec<NormalizedId>,
    pub correct_option_ids: Vec<NormalizedId>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDetail {
    pub id: NormalizedId,
    pub text: Option<String>,
    pub is_correct: bool,
    pub is_selected: bool,
}
