// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::QuestionSet;

/// Maximum accepted display name length, in characters.
const MAX_DISPLAY_NAME_LEN: usize = 64;

/// Validates that a question set can seed a room.
///
/// # Errors
///
/// Returns an error if:
/// - The set contains no questions
/// - A question has empty text
/// - A question has no options
/// - A question's correct answer is not one of its options
pub fn validate_question_set(question_set: &QuestionSet) -> Result<(), DomainError> {
    if question_set.questions.is_empty() {
        return Err(DomainError::EmptyQuestionSet {
            question_set_id: question_set.question_set_id.unwrap_or_default(),
        });
    }

    for (index, question) in question_set.questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            return Err(DomainError::InvalidQuestion {
                index,
                reason: String::from("Question text cannot be empty"),
            });
        }
        if question.options.is_empty() {
            return Err(DomainError::InvalidQuestion {
                index,
                reason: String::from("Question must have at least one option"),
            });
        }
        if !question.options.contains(&question.correct_answer) {
            return Err(DomainError::InvalidQuestion {
                index,
                reason: format!(
                    "Correct answer '{}' is not one of the options",
                    question.correct_answer
                ),
            });
        }
    }

    Ok(())
}

/// Validates a requested question index against the snapshot size.
///
/// # Returns
///
/// The index as `usize` when it lies within `[0, question_count)`.
///
/// # Errors
///
/// Returns `DomainError::QuestionIndexOutOfRange` if the index is negative or
/// not less than `question_count`.
pub fn validate_question_index(index: i64, question_count: usize) -> Result<usize, DomainError> {
    match usize::try_from(index) {
        Ok(value) if value < question_count => Ok(value),
        _ => Err(DomainError::QuestionIndexOutOfRange {
            index,
            question_count,
        }),
    }
}

/// Validates the time spent on one question.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeSpent` if the value is negative, NaN or
/// infinite.
pub fn validate_time_spent(time_spent: f64) -> Result<(), DomainError> {
    if !time_spent.is_finite() {
        return Err(DomainError::InvalidTimeSpent(String::from(
            "Time spent must be a finite number",
        )));
    }
    if time_spent < 0.0 {
        return Err(DomainError::InvalidTimeSpent(format!(
            "Time spent cannot be negative, got {time_spent}"
        )));
    }
    Ok(())
}

/// Validates a submitted answer.
///
/// # Errors
///
/// Returns `DomainError::InvalidAnswer` if the answer is empty.
pub fn validate_user_answer(user_answer: &str) -> Result<(), DomainError> {
    if user_answer.is_empty() {
        return Err(DomainError::InvalidAnswer(String::from(
            "Answer cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a participant display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidDisplayName` if the name is blank or too long.
pub fn validate_display_name(display_name: &str) -> Result<(), DomainError> {
    let trimmed: &str = display_name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(DomainError::InvalidDisplayName(format!(
            "Display name cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(())
}
