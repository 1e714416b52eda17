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

use ratatui::layout::Rect;

use crate::config::{JournalConfig, MarkTypeOption};
use crate::draft::{GradeEntryDraft, GradeSubmission, SubmissionSink};

pub const MAIN_HELP: &str = "Enter: выставить оценку | q: выход";
pub const MODAL_HELP: &str =
    "Tab: раздел | ←/→: выбор | Space: отметить | s: сохранить | d: удалить | a: ещё отметка | Esc: закрыть";

/// Hints shown for the delete control, mirroring its enabled state.
pub const HINT_DELETE_ENABLED: &str = "Удалить выбранную оценку";
pub const HINT_DELETE_DISABLED: &str = "Выберите оценку для удаления";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Marks,
    Attendance,
    MarkType,
    Comment,
}

pub struct App {
    pub student: String,
    // option catalogs
    pub mark_options: Vec<String>,
    pub mark_types: Vec<MarkTypeOption>,
    // dialog state
    pub show_mark_modal: bool,
    pub focus: Focus,
    // form controls (the draft lives here while the dialog is open)
    pub selected_mark: Option<usize>,
    pub marks_cursor: usize,
    pub comment_input: String,
    pub attendance: bool,
    pub mark_type_idx: usize,
    // delete-mark confirmation popup
    pub show_delete_confirm: bool,
    // generic warning popup
    pub show_warning_popup: bool,
    pub warning_message: String,
    // saved-report popup (shown after a successful save)
    pub show_saved_popup: bool,
    pub saved_message: String,
    pub status: String,
    pub last_submission: Option<GradeSubmission>,
    // last known terminal area, used for mouse hit tests
    pub viewport: Rect,
    pub sink: Box<dyn SubmissionSink>,
}

impl App {
    pub fn new(student: String, cfg: JournalConfig, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            student,
            mark_options: cfg.marks,
            mark_types: cfg.mark_types,
            show_mark_modal: false,
            focus: Focus::Marks,
            selected_mark: None,
            marks_cursor: 0,
            comment_input: String::new(),
            attendance: false,
            mark_type_idx: 0,
            show_delete_confirm: false,
            show_warning_popup: false,
            warning_message: String::new(),
            show_saved_popup: false,
            saved_message: String::new(),
            status: MAIN_HELP.to_string(),
            last_submission: None,
            viewport: Rect::new(0, 0, 80, 24),
            sink,
        }
    }

    /// The delete control is enabled exactly when a mark is selected.
    pub fn delete_enabled(&self) -> bool {
        self.selected_mark.is_some()
    }

    pub fn delete_hint(&self) -> &'static str {
        if self.delete_enabled() {
            HINT_DELETE_ENABLED
        } else {
            HINT_DELETE_DISABLED
        }
    }

    pub fn selected_mark_value(&self) -> Option<&str> {
        self.selected_mark
            .and_then(|i| self.mark_options.get(i))
            .map(String::as_str)
    }

    pub fn current_mark_type(&self) -> MarkTypeOption {
        self.mark_types
            .get(self.mark_type_idx)
            .cloned()
            .unwrap_or_else(MarkTypeOption::unset)
    }

    /// Snapshot of the current form-control values.
    pub fn draft(&self) -> GradeEntryDraft {
        let mark_type = self.current_mark_type();
        GradeEntryDraft {
            mark: self.selected_mark_value().map(str::to_string),
            mark_type: mark_type.value,
            mark_type_text: mark_type.label,
            comment: self.comment_input.clone(),
            attendance: self.attendance,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Marks => Focus::Attendance,
            Focus::Attendance => Focus::MarkType,
            Focus::MarkType => Focus::Comment,
            Focus::Comment => Focus::Marks,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Marks => Focus::Comment,
            Focus::Attendance => Focus::Marks,
            Focus::MarkType => Focus::Attendance,
            Focus::Comment => Focus::MarkType,
        };
    }
}
