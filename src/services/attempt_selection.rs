use std::{collections::HashMap, hash::Hash};

use crate::models::domain::{lenient, NormalizedId, QuizAttempt};

/// Keeps the latest attempt per key, in order of each key's first
/// appearance. Latest means greatest `endTime` (else `startTime`); attempts
/// without a readable timestamp count as oldest. On an exact tie the attempt
/// seen later wins, so the result depends on the order storage returned.
pub fn latest_per_key<K, F>(attempts: Vec<QuizAttempt>, key_of: F) -> Vec<QuizAttempt>
where
    K: Eq + Hash,
    F: Fn(&QuizAttempt) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut latest: Vec<(Option<i64>, QuizAttempt)> = Vec::new();

    for attempt in attempts {
        let key = key_of(&attempt);
        let recency = attempt.recency_millis();
        match slots.get(&key) {
            Some(&slot) => {
                if recency.unwrap_or(i64::MIN) >= latest[slot].0.unwrap_or(i64::MIN) {
                    latest[slot] = (recency, attempt);
                }
            }
            None => {
                slots.insert(key, latest.len());
                latest.push((recency, attempt));
            }
        }
    }

    latest.into_iter().map(|(_, attempt)| attempt).collect()
}

pub fn latest_per_enrollment(attempts: Vec<QuizAttempt>) -> Vec<QuizAttempt> {
    latest_per_key(attempts, |attempt| attempt.enrollment_number.clone())
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum QuizKey {
    Id(i64),
    Raw(String),
}

/// Attempts whose quiz id cannot be normalized are grouped by the stored
/// value as written; their rows carry no quiz fields.
pub fn latest_per_quiz(attempts: Vec<QuizAttempt>) -> Vec<QuizAttempt> {
    latest_per_key(attempts, |attempt| match &attempt.quiz_id {
        NormalizedId::Int(id) => QuizKey::Id(*id),
        NormalizedId::Unparsed(raw) => QuizKey::Raw(lenient::to_json(raw).to_string()),
    })
}
