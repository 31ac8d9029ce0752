use std::collections::HashMap;

use mongodb::bson::Bson;
use thiserror::Error;

use crate::models::{
    domain::{lenient, AttemptAnswer, NormalizedId, Question, Quiz, QuizAttempt},
    dto::attempt_detail::{
        AttemptDetailDto, AttemptMeta, AttemptSummary, OptionDetail, QuestionDetail, QuizSummary,
        ScoringSummary, StudentSummary, TimingSummary,
    },
};

/// Where a resolved display order came from. Checked in this order; the first
/// tier that yields a non-empty list wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOrderSource {
    DisplayedQuestions,
    DisplayOrder,
    Answers,
}

#[derive(Debug, Clone)]
pub struct DisplayOrder {
    pub source: DisplayOrderSource,
    pub question_ids: Vec<NormalizedId>,
}

#[derive(Debug, Error)]
pub enum DisplayOrderError {
    #[error("displayedQuestions is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("displayedQuestions could not be converted: {0}")]
    Conversion(#[from] mongodb::bson::ser::Error),

    #[error("displayedQuestions is not an array")]
    NotAnArray,
}

fn dedup_ids<'a>(ids: impl IntoIterator<Item = &'a NormalizedId>) -> Vec<NormalizedId> {
    let mut unique: Vec<NormalizedId> = Vec::new();
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}

/// Question id -> de-duplicated selected option ids. A later answer for the
/// same question replaces an earlier one.
pub fn index_answers(answers: &[AttemptAnswer]) -> HashMap<i64, Vec<NormalizedId>> {
    answers
        .iter()
        .filter_map(|answer| {
            let qid = answer.question_id.as_i64()?;
            Some((qid, dedup_ids(&answer.selected_option_ids)))
        })
        .collect()
}

/// Decodes `displayedQuestions` into question ids sorted by their recorded
/// order. Ties keep their stored sequence.
pub fn parse_displayed_questions(raw: &Bson) -> Result<Vec<NormalizedId>, DisplayOrderError> {
    let items = match raw {
        Bson::String(encoded) => {
            let value: serde_json::Value = serde_json::from_str(encoded)?;
            match mongodb::bson::to_bson(&value)? {
                Bson::Array(items) => items,
                _ => return Err(DisplayOrderError::NotAnArray),
            }
        }
        Bson::Array(items) => items.clone(),
        _ => return Err(DisplayOrderError::NotAnArray),
    };

    let mut entries: Vec<(NormalizedId, f64)> = items
        .iter()
        .map(|item| match item {
            Bson::Document(entry) => {
                let qid = entry
                    .get("questionId")
                    .map(NormalizedId::from_bson)
                    .unwrap_or_default();
                let order = [entry.get("displayOrder"), entry.get("originalOrder")]
                    .into_iter()
                    .flatten()
                    .find(|value| !matches!(value, Bson::Null))
                    .and_then(lenient::as_number)
                    .unwrap_or(0.0);
                (qid, order)
            }
            scalar => (NormalizedId::from_bson(scalar), 0.0),
        })
        .collect();

    entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    Ok(entries.into_iter().map(|(qid, _)| qid).collect())
}

pub fn resolve_display_order(attempt: &QuizAttempt) -> DisplayOrder {
    if let Some(raw) = &attempt.displayed_questions {
        match parse_displayed_questions(raw) {
            Ok(ids) if !ids.is_empty() => {
                return DisplayOrder {
                    source: DisplayOrderSource::DisplayedQuestions,
                    question_ids: ids,
                };
            }
            Ok(_) => {}
            Err(err) => log::debug!(
                "attempt {:?}: ignoring displayedQuestions: {}",
                attempt.attempt_id,
                err
            ),
        }
    }

    if let Some(Bson::Array(items)) = &attempt.display_order {
        if !items.is_empty() {
            return DisplayOrder {
                source: DisplayOrderSource::DisplayOrder,
                question_ids: items.iter().map(NormalizedId::from_bson).collect(),
            };
        }
    }

    DisplayOrder {
        source: DisplayOrderSource::Answers,
        question_ids: dedup_ids(attempt.answers.iter().map(|answer| &answer.question_id)),
    }
}

/// True only when the selection equals the answer key as a set. A subset of
/// the correct options is not correct.
pub fn is_exact_selection(selected: &[NormalizedId], correct: &[NormalizedId]) -> bool {
    let contains = |set: &[NormalizedId], id: &NormalizedId| set.iter().any(|c| c.matches(id));

    let no_wrong_choice = selected.iter().all(|id| contains(correct, id));
    let same_size = selected.len() == correct.len();
    let all_correct_chosen = correct.iter().all(|id| contains(selected, id));

    no_wrong_choice && same_size && all_correct_chosen
}

/// Two-decimal percentage, scaled by 10000 before rounding to match the
/// values shown historically.
pub fn percentage(marks_obtained: Option<f64>, total_marks: Option<f64>) -> Option<f64> {
    match (marks_obtained, total_marks) {
        (Some(marks), Some(total)) if total > 0.0 => {
            Some(lenient::round_half_up(marks / total * 10000.0) / 100.0)
        }
        _ => None,
    }
}

fn question_detail(
    index: usize,
    question: &Question,
    quiz: &Quiz,
    selected: Vec<NormalizedId>,
) -> QuestionDetail {
    let correct_option_ids = question.correct_option_ids();
    let is_correct = is_exact_selection(&selected, &correct_option_ids);

    let options = question
        .options
        .iter()
        .map(|option| OptionDetail {
            id: option.id.clone(),
            text: option.option_text.clone(),
            is_correct: option.is_correct(),
            is_selected: selected.iter().any(|id| id.matches(&option.id)),
        })
        .collect();

    QuestionDetail {
        index,
        question_id: question.id.clone(),
        question_text: question.question_text.clone(),
        image_url: question.image_url.clone(),
        points: question.points_or_default(),
        difficulty: question.difficulty.clone(),
        topic: question.topic.clone(),
        subject: question.subject.clone().or_else(|| quiz.subject.clone()),
        options,
        selected_option_ids: selected,
        correct_option_ids,
        is_correct,
    }
}

pub fn build_questions(attempt: &QuizAttempt, quiz: &Quiz) -> Vec<QuestionDetail> {
    let answers = index_answers(&attempt.answers);
    let order = resolve_display_order(attempt);
    log::debug!(
        "attempt {:?}: display order from {:?} ({} ids)",
        attempt.attempt_id,
        order.source,
        order.question_ids.len()
    );

    let questions: HashMap<i64, &Question> = quiz
        .questions
        .iter()
        .filter_map(|question| Some((question.id.as_i64()?, question)))
        .collect();

    order
        .question_ids
        .iter()
        .filter_map(|qid| {
            let key = qid.as_i64()?;
            let question = questions.get(&key)?;
            let selected = answers.get(&key).cloned().unwrap_or_default();
            Some((*question, selected))
        })
        .enumerate()
        .map(|(position, (question, selected))| {
            question_detail(position + 1, question, quiz, selected)
        })
        .collect()
}

pub fn build_summary(attempt: &QuizAttempt, quiz: &Quiz) -> AttemptSummary {
    AttemptSummary {
        attempt_id: attempt.attempt_id.clone(),
        quiz: QuizSummary {
            quiz_id: quiz.quiz_id.clone(),
            quiz_name: quiz.quiz_name.clone(),
            quiz_code: quiz.quiz_code.clone(),
            subject: quiz.subject.clone(),
            subject_code: quiz.subject_code.clone(),
            course: quiz.course.clone(),
            instructor_name: quiz.instructor_name.clone(),
            academic_year: quiz.academic_year.clone(),
            course_year: quiz.course_year.clone(),
            num_displayed_questions: quiz.num_displayed_questions,
            show_detailed_result: quiz.shows_detailed_result(),
        },
        student: StudentSummary {
            student_name: attempt.student_name.clone(),
            student_email: attempt.student_email.clone(),
            enrollment_number: attempt.enrollment_number.clone(),
            section: attempt.section.clone(),
        },
        timing: TimingSummary {
            start_time: lenient::opt_to_json(attempt.start_time.as_ref()),
            end_time: lenient::opt_to_json(attempt.end_time.as_ref()),
            duration_minutes: attempt.duration_minutes(),
        },
        scoring: ScoringSummary {
            marks_obtained: attempt.marks_obtained,
            total_marks: attempt.total_marks,
            percentage: percentage(attempt.marks_obtained, attempt.total_marks),
            easy_questions_correct: attempt.easy_questions_correct,
            medium_questions_correct: attempt.medium_questions_correct,
            high_questions_correct: attempt.high_questions_correct,
            num_easy_questions: quiz.num_easy_questions,
            num_medium_questions: quiz.num_medium_questions,
            num_high_questions: quiz.num_high_questions,
        },
        meta: AttemptMeta {
            status: attempt.status.clone(),
            system_name: attempt.system_name.clone(),
            full_screen_faults: attempt.full_screen_faults,
        },
    }
}

pub fn build_attempt_detail(attempt: &QuizAttempt, quiz: &Quiz) -> AttemptDetailDto {
    AttemptDetailDto {
        summary: build_summary(attempt, quiz),
        questions: build_questions(attempt, quiz),
    }
}
