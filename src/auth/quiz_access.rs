use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Z0-9]").expect("NON_ALPHANUMERIC is a valid regex pattern"));

const PASSWORD_LENGTH: usize = 6;

/// Uppercase, strip everything but ASCII letters and digits, keep the first
/// six characters. Applied to both the stored and the supplied password.
pub fn normalize_quiz_password(raw: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&raw.to_uppercase(), "")
        .chars()
        .take(PASSWORD_LENGTH)
        .collect()
}

/// Gate for the instructor results view. Trusted callers skip the password.
/// A quiz without a usable stored password admits only trusted callers.
pub fn require_quiz_access(
    trusted: bool,
    supplied: Option<&str>,
    stored: Option<&str>,
) -> AppResult<()> {
    if trusted {
        return Ok(());
    }

    let supplied = supplied
        .ok_or_else(|| AppError::ValidationError("password is required".to_string()))?;

    let expected = stored.map(normalize_quiz_password).unwrap_or_default();
    if expected.is_empty() || expected != normalize_quiz_password(supplied) {
        return Err(AppError::Unauthorized("Invalid quiz password".to_string()));
    }
    Ok(())
}
