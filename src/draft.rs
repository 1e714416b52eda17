/*
 * This file is part of Markpad.
 *
 * Copyright (C) 2025 Markpad contributors
 *
 * Markpad is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Markpad is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Markpad. If not, see <https://www.gnu.org/licenses/>.
 */

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::logger;

/// Placeholder stored when the comment field is left empty.
pub const NO_COMMENT: &str = "Нет комментария";
/// Attendance display strings: present / absent.
pub const PRESENT: &str = "Был";
pub const ABSENT: &str = "Не был";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Пожалуйста, выберите оценку!")]
    MarkRequired,
    #[error("Нет выбранной оценки для удаления")]
    NothingToDelete,
}

/// In-progress, unsaved state of the mark form.
///
/// Lives in the bound controls (`App` fields) while the dialog is open; a
/// snapshot is taken at save time and normalized into a [`GradeSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeEntryDraft {
    pub mark: Option<String>,
    pub mark_type: String,
    pub mark_type_text: String,
    pub comment: String,
    pub attendance: bool,
}

impl GradeEntryDraft {
    /// Validate the draft and assemble the submission payload.
    ///
    /// Fails when no mark is selected. The comment is trimmed and an empty
    /// comment becomes the fixed placeholder; attendance is mapped to its
    /// display string alongside the raw flag.
    pub fn into_submission(self, student: &str) -> Result<GradeSubmission, ValidationError> {
        let mark = self.mark.ok_or(ValidationError::MarkRequired)?;
        let comment = self.comment.trim();
        let comment = if comment.is_empty() {
            NO_COMMENT.to_string()
        } else {
            comment.to_string()
        };
        Ok(GradeSubmission {
            student: student.to_string(),
            mark,
            mark_type: self.mark_type,
            mark_type_text: self.mark_type_text,
            comment,
            attendance: if self.attendance { PRESENT } else { ABSENT }.to_string(),
            attendance_status: self.attendance,
        })
    }
}

/// Payload shape reserved for a future network/persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradeSubmission {
    pub student: String,
    pub mark: String,
    pub mark_type: String,
    pub mark_type_text: String,
    pub comment: String,
    pub attendance: String,
    pub attendance_status: bool,
}

impl GradeSubmission {
    /// Human-readable confirmation shown after a successful save.
    pub fn report(&self) -> String {
        format!(
            "Данные сохранены:\n\nСтудент: {}\nОценка: {}\nТип оценки: {}\nПосещение: {}\nКомментарий: \"{}\"",
            self.student, self.mark, self.mark_type_text, self.attendance, self.comment
        )
    }
}

/// Submission hook. The dialog hands every saved payload to this trait; a
/// network collaborator can be wired in here later without touching the
/// controller.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink {
    fn submit(&mut self, submission: &GradeSubmission) -> anyhow::Result<()>;
}

/// Default sink: records the payload to the event log and nothing else.
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, submission: &GradeSubmission) -> anyhow::Result<()> {
        logger::log_event(
            "mark_submitted",
            serde_json::to_value(submission).unwrap_or_else(|_| json!({})),
        );
        Ok(())
    }
}
